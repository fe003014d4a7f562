use uri_kit::*;

#[test]
fn parse_http() {
    let c = parse("http://www.Example.com:8080/a?b#c", &Options::new());
    assert_eq!(c.scheme.as_deref(), Some("http"));
    assert_eq!(c.host.as_deref(), Some("www.example.com"));
    assert_eq!(c.port, Some(Port::Number(8080)));
    assert_eq!(c.path, "/a");
    assert_eq!(c.data, SchemeData::Http);
    assert_eq!(c.error, None);

    let c = parse("https://\u{7d0d}\u{8c46}.example.org/", &Options::new());
    assert_eq!(c.host.as_deref(), Some("xn--99zt52a.example.org"));

    let c = parse("http://%E7%B4%8D%E8%B1%86.example.org/", &Options::new());
    assert_eq!(c.host.as_deref(), Some("xn--99zt52a.example.org"));
}

#[test]
fn missing_host() {
    let options = Options::new();
    assert_eq!(parse("http:", &options).error, Some(UriError::MissingHost));
    assert_eq!(parse("http:///path", &options).error, Some(UriError::MissingHost));
    assert_eq!(parse("https://", &options).error, Some(UriError::MissingHost));
    assert_eq!(parse("http://a", &options).error, None);
}

#[test]
fn serialize_http() {
    let c = UriComponents {
        scheme: Some("http".to_owned()),
        host: Some("example.com".to_owned()),
        port: Some(Port::Number(80)),
        ..UriComponents::default()
    };
    assert_eq!(serialize(&c, &Options::new()), "http://example.com/");

    let c = UriComponents {
        scheme: Some("https".to_owned()),
        port: Some(Port::Number(443)),
        ..c
    };
    assert_eq!(serialize(&c, &Options::new()), "https://example.com/");

    let c = UriComponents {
        port: Some(Port::Number(80)),
        ..c
    };
    assert_eq!(serialize(&c, &Options::new()), "https://example.com:80/");

    let c = UriComponents {
        port: Some(Port::Text(String::new())),
        path: "/a".to_owned(),
        ..c
    };
    assert_eq!(serialize(&c, &Options::new()), "https://example.com/a");
}

#[test]
fn normalize_http() {
    let options = Options::new();
    assert_eq!(normalize("HTTP://ABC.com:/%7esmith", &options), "http://abc.com/~smith");
    assert_eq!(normalize("HTTP://www.EXAMPLE.com/", &options), "http://www.example.com/");
    assert_eq!(normalize("https://example.com:443", &options), "https://example.com/");
    assert_eq!(
        normalize("http://\u{7d0d}\u{8c46}.example.org/", &options),
        "http://xn--99zt52a.example.org/"
    );
    assert_eq!(
        normalize("http://xn--99zt52a.example.org/", &options.clone().iri(true)),
        "http://\u{7d0d}\u{8c46}.example.org/"
    );
}

#[test]
fn equal_http() {
    let options = Options::new();
    assert!(equal(
        "http://abc.com:80/~smith/home.html",
        "http://ABC.com/%7Esmith/home.html",
        &options
    ));
    assert!(equal("HTTP://ABC.COM", "http://abc.com/", &options));
    assert!(equal("http://example.com:/", "http://example.com:80/", &options));
    assert!(!equal("http://example.com:8080/", "http://example.com/", &options));
    assert!(!equal("http://example.com/", "https://example.com/", &options));
}
