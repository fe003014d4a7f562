use uri_kit::*;

trait Test {
    fn pass(&self, reference: &str, expected: &str);
    fn pass_tolerant(&self, reference: &str, expected: &str);
}

impl Test for str {
    #[track_caller]
    fn pass(&self, reference: &str, expected: &str) {
        assert_eq!(resolve(self, reference, &Options::new()), expected);
        let c = resolve_components(self, reference, &Options::new());
        assert_eq!(c.error, None);
    }

    #[track_caller]
    fn pass_tolerant(&self, reference: &str, expected: &str) {
        assert_eq!(
            resolve(self, reference, &Options::new().tolerant(true)),
            expected
        );
    }
}

#[test]
fn resolve_normal() {
    let base = "uri://a/b/c/d;p?q";

    base.pass("g:h", "g:h");
    base.pass("g", "uri://a/b/c/g");
    base.pass("./g", "uri://a/b/c/g");
    base.pass("g/", "uri://a/b/c/g/");
    base.pass("/g", "uri://a/g");
    base.pass("//g", "uri://g");
    base.pass("?y", "uri://a/b/c/d;p?y");
    base.pass("g?y", "uri://a/b/c/g?y");
    base.pass("#s", "uri://a/b/c/d;p?q#s");
    base.pass("g#s", "uri://a/b/c/g#s");
    base.pass("g?y#s", "uri://a/b/c/g?y#s");
    base.pass(";x", "uri://a/b/c/;x");
    base.pass("g;x", "uri://a/b/c/g;x");
    base.pass("g;x?y#s", "uri://a/b/c/g;x?y#s");
    base.pass("", "uri://a/b/c/d;p?q");
    base.pass(".", "uri://a/b/c/");
    base.pass("./", "uri://a/b/c/");
    base.pass("..", "uri://a/b/");
    base.pass("../", "uri://a/b/");
    base.pass("../g", "uri://a/b/g");
    base.pass("../..", "uri://a/");
    base.pass("../../", "uri://a/");
    base.pass("../../g", "uri://a/g");
}

#[test]
fn resolve_abnormal() {
    let base = "uri://a/b/c/d;p?q";

    base.pass("../../../g", "uri://a/g");
    base.pass("../../../../g", "uri://a/g");

    base.pass("/./g", "uri://a/g");
    base.pass("/../g", "uri://a/g");
    base.pass("g.", "uri://a/b/c/g.");
    base.pass(".g", "uri://a/b/c/.g");
    base.pass("g..", "uri://a/b/c/g..");
    base.pass("..g", "uri://a/b/c/..g");

    base.pass("./../g", "uri://a/b/g");
    base.pass("./g/.", "uri://a/b/c/g/");
    base.pass("g/./h", "uri://a/b/c/g/h");
    base.pass("g/../h", "uri://a/b/c/h");
    base.pass("g;x=1/./y", "uri://a/b/c/g;x=1/y");
    base.pass("g;x=1/../y", "uri://a/b/c/y");

    base.pass("g?y/./x", "uri://a/b/c/g?y/./x");
    base.pass("g?y/../x", "uri://a/b/c/g?y/../x");
    base.pass("g#s/./x", "uri://a/b/c/g#s/./x");
    base.pass("g#s/../x", "uri://a/b/c/g#s/../x");

    base.pass("uri:g", "uri:g");
    base.pass_tolerant("uri:g", "uri://a/b/c/g");
    base.pass_tolerant("URI:g", "uri://a/b/c/g");
    base.pass_tolerant("other:g", "other:g");
}

#[test]
fn resolve_escapes_result() {
    "//www.g.com/".pass_tolerant("/adf\ngf", "//www.g.com/adf%0Agf");
    "//www.g.com/error\n/bleh/bleh".pass_tolerant("..", "//www.g.com/error%0A/");
}

#[test]
fn resolve_special_bases() {
    "http://example.com".pass("foo", "http://example.com/foo");
    "uri://a".pass("?q", "uri://a?q");
    "uri:a/b".pass("c", "uri:a/c");
    "uri:/a/b/".pass("../../../c", "uri:/c");
}

#[test]
fn base_not_absolute() {
    let c = resolve_components("", "urn:some:ip:prop", &Options::new());
    assert_eq!(c.error, Some(UriError::BaseNotAbsolute));
    assert_eq!(
        resolve("", "urn:some:ip:prop", &Options::new()),
        "urn:some:ip:prop"
    );

    let c = resolve_components("", "urn:some:ip:prop", &Options::new().tolerant(true));
    assert_eq!(c.error, None);

    let c = resolve_components("a/b", "c", &Options::new());
    assert_eq!(c.path, "a/c");
    assert_eq!(c.error, Some(UriError::BaseNotAbsolute));
}

#[test]
fn resolve_components_kind() {
    let c = resolve_components("uri://a/b/c/d;p?q", "../g#s", &Options::new());
    assert_eq!(c.scheme.as_deref(), Some("uri"));
    assert_eq!(c.host.as_deref(), Some("a"));
    assert_eq!(c.path, "/b/g");
    assert_eq!(c.query, None);
    assert_eq!(c.fragment.as_deref(), Some("s"));
    assert_eq!(c.reference, Reference::Uri);

    let c = resolve_components("HTTP://a/b", "g", &Options::new());
    assert_eq!(c.scheme.as_deref(), Some("http"));
    assert_eq!(c.reference, Reference::Absolute);
}

#[test]
fn resolve_propagates_errors() {
    let c = resolve_components("uri://a/b", "g%zz", &Options::new());
    let Some(UriError::Parse(e)) = c.error else {
        panic!("no syntax error");
    };
    assert_eq!((e.index(), e.kind()), (1, ParseErrorKind::InvalidOctet));
    assert_eq!(c.path, "/g%25zz");
}
