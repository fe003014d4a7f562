//! Parsing, serialization, resolution and normalization of URI references.

use crate::{
    component::{Port, UriComponents},
    error::{ParseError, ParseErrorKind, UriError},
    grammar::Grammar,
    idn,
    ip::{self, HostKind},
    log::{debug, warning},
    parser::{self, RawRef},
    pct_enc::{self, table},
    registry::{Registry, SchemeHandler},
    Options,
};
use std::ops::Range;

fn find_handler<'r>(
    registry: Option<&'r Registry>,
    components: &UriComponents,
    options: &Options,
) -> Option<&'r dyn SchemeHandler> {
    let scheme = options
        .scheme_override()
        .or(components.scheme.as_deref())?;
    let handler = registry?.get(scheme);
    if handler.is_some() {
        debug!("dispatching to the handler for scheme {scheme:?}");
    }
    handler
}

/// Checks a raw component for malformed percent-encoded octets.
fn check_octets(components: &mut UriComponents, input: &str, span: Option<&Range<usize>>) {
    if let Some(span) = span {
        if let Some(i) = pct_enc::find_malformed_octet(&input[span.clone()]) {
            components.set_error(ParseError::new(span.start + i, ParseErrorKind::InvalidOctet));
        }
    }
}

fn check_scheme(components: &mut UriComponents, input: &str, span: &Range<usize>) {
    let scheme = &input[span.clone()];
    let bad = scheme.char_indices().find(|&(i, ch)| {
        if i == 0 {
            !ch.is_ascii_alphabetic()
        } else {
            !table::SCHEME.allows(ch)
        }
    });
    if let Some((i, _)) = bad {
        components.set_error(ParseError::new(
            span.start + i,
            ParseErrorKind::UnexpectedChar,
        ));
    }
}

/// Reads the host, dropping the brackets of an IP literal.
fn read_host(components: &mut UriComponents, input: &str, span: &Range<usize>) -> String {
    let host = &input[span.clone()];
    let Some(inner) = host.strip_prefix('[') else {
        check_octets(components, input, Some(span));
        return host.to_owned();
    };
    let inner = inner.strip_suffix(']');

    if let Some((addr, zone)) = inner.and_then(ip::split_ipv6) {
        match zone {
            Some(zone) => format!("{addr}%{zone}"),
            None => addr.to_owned(),
        }
    } else if let Some(inner) = inner.filter(|inner| ip::is_ipv_future(inner)) {
        inner.to_owned()
    } else {
        // Kept bracketed so that it serializes back as an IP literal.
        components.set_error(ParseError::new(span.start, ParseErrorKind::InvalidIpLiteral));
        host.to_owned()
    }
}

fn read_components(input: &str, raw: &RawRef, options: &Options) -> UriComponents {
    let mut c = UriComponents::new();
    let get = |span: &Option<Range<usize>>| span.as_ref().map(|r| input[r.clone()].to_owned());

    if let Some(span) = &raw.scheme {
        check_scheme(&mut c, input, span);
    }
    c.scheme = get(&raw.scheme);

    check_octets(&mut c, input, raw.userinfo.as_ref());
    c.userinfo = get(&raw.userinfo);

    if let Some(e) = raw.error {
        c.set_error(e);
    }
    let host = raw.host.as_ref().map(|span| read_host(&mut c, input, span));
    c.host = host;

    if let Some(span) = &raw.port {
        match Port::parse(&input[span.clone()]) {
            Ok(port) => c.port = Some(port),
            Err(port) => {
                if !options.is_tolerant() {
                    c.set_error(UriError::InvalidPort(port.to_string()));
                }
                c.port = Some(port);
            }
        }
    }

    check_octets(&mut c, input, Some(&raw.path));
    c.path = input[raw.path.clone()].to_owned();
    check_octets(&mut c, input, raw.query.as_ref());
    c.query = get(&raw.query);
    check_octets(&mut c, input, raw.fragment.as_ref());
    c.fragment = get(&raw.fragment);
    c
}

/// Canonicalizes the percent-encoding of every component.
///
/// In canonical mode, this also lowercases the scheme and host, writes IP
/// addresses in canonical form, removes dot segments from absolute paths,
/// and drops an empty port.
fn normalize_fields(c: &mut UriComponents, grammar: &Grammar, canonical: bool) {
    let normalize = |s: &str, table, lowercase| {
        let mut buf = String::with_capacity(s.len());
        pct_enc::normalize_component(&mut buf, s, table, grammar.unreserved, lowercase);
        buf
    };

    if canonical {
        if let Some(scheme) = &mut c.scheme {
            scheme.make_ascii_lowercase();
        }
        if c.port.as_ref().is_some_and(Port::is_empty) {
            c.port = None;
        }
    }

    if let Some(userinfo) = &c.userinfo {
        c.userinfo = Some(normalize(userinfo, grammar.userinfo, false));
    }

    if let Some(host) = &c.host {
        let host = match ip::classify(host) {
            HostKind::Ipv6 => match ip::split_ipv6(host) {
                _ if canonical => ip::canonicalize_ipv6(host).unwrap_or_else(|| host.clone()),
                Some((addr, Some(zone))) => format!("{addr}%{zone}"),
                Some((addr, None)) => addr.to_owned(),
                None => host.clone(),
            },
            HostKind::IpvFuture => {
                let inner = host
                    .strip_prefix('[')
                    .and_then(|h| h.strip_suffix(']'))
                    .unwrap_or(host);
                if canonical {
                    inner.to_ascii_lowercase()
                } else {
                    inner.to_owned()
                }
            }
            HostKind::Ipv4 if canonical => {
                ip::canonicalize_ipv4(host).unwrap_or_else(|| host.clone())
            }
            HostKind::Ipv4 | HostKind::RegName => normalize(host, grammar.host, canonical),
        };
        c.host = Some(host);
    }

    let path_table = if c.scheme.as_deref().is_some_and(|s| !s.is_empty()) {
        grammar.path
    } else {
        grammar.path_noscheme
    };
    c.path = normalize(&c.path, path_table, false);
    if canonical && c.path.starts_with('/') {
        c.path = remove_dot_segments(&c.path);
    }

    if let Some(query) = &c.query {
        c.query = Some(normalize(query, grammar.query, false));
    }
    if let Some(fragment) = &c.fragment {
        c.fragment = Some(normalize(fragment, grammar.fragment, false));
    }
}

/// Whether the host of `c` should be treated as a domain name.
fn is_domain_host(c: &UriComponents, options: &Options, handler: Option<&dyn SchemeHandler>) -> bool {
    let wanted = options.is_domain_host() || handler.is_some_and(|h| h.domain_host());
    wanted
        && c.host.as_deref().is_some_and(|host| {
            !host.is_empty() && matches!(ip::classify(host), HostKind::RegName)
        })
}

pub(crate) fn parse(registry: Option<&Registry>, input: &str, options: &Options) -> UriComponents {
    let full;
    let input = if options.is_suffix() {
        full = match options.scheme_override() {
            Some(scheme) => format!("{scheme}://{input}"),
            None => format!("//{input}"),
        };
        full.as_str()
    } else {
        input
    };

    let raw = parser::decompose(input);
    let mut c = read_components(input, &raw, options);
    #[cfg(feature = "log")]
    if let Some(e) = &c.error {
        warning!("malformed reference {input:?}: {e}");
    }

    c.reference = c.derive_reference();
    if let Some(expected) = options.expected_reference() {
        if expected != c.reference {
            c.set_error(UriError::ReferenceMismatch {
                expected,
                found: c.reference,
            });
        }
    }

    let handler = find_handler(registry, &c, options);

    if !options.has_unicode_support() && is_domain_host(&c, options, handler) {
        if let Some(host) = &c.host {
            let domain = pct_enc::decode_octets(host).to_lowercase();
            match idn::to_ascii(&domain) {
                Ok(ascii) => c.host = Some(ascii),
                Err(e) => c.set_error(e),
            }
        }
    }

    let grammar = Grammar::get(options.is_iri() && options.has_unicode_support());
    normalize_fields(&mut c, grammar, options.is_canonical());

    if let (Some(handler), Some(registry)) = (handler, registry) {
        handler.parse(&mut c, options, registry);
    }
    c
}

/// Serializes components in place, letting the scheme handler rewrite them first.
fn serialize_owned(registry: Option<&Registry>, mut c: UriComponents, options: &Options) -> String {
    let handler = find_handler(registry, &c, options);
    if let (Some(handler), Some(registry)) = (handler, registry) {
        handler.serialize(&mut c, options, registry);
    }

    if is_domain_host(&c, options, handler) {
        if let Some(host) = &c.host {
            let converted = if options.is_iri() {
                let (unicode, error) = idn::to_unicode(host);
                error.map_or(Ok(unicode), Err)
            } else {
                idn::to_ascii(&pct_enc::decode_octets(host).to_lowercase())
            };
            match converted {
                Ok(host) => c.host = Some(host),
                Err(e) => c.set_error(e),
            }
        }
    }

    let grammar = Grammar::get(options.is_iri());
    if let Some(scheme) = &mut c.scheme {
        scheme.retain(|ch| grammar.scheme.allows(ch));
    }
    normalize_fields(&mut c, grammar, options.is_canonical());
    recompose(&c, options)
}

fn recompose(c: &UriComponents, options: &Options) -> String {
    let mut buf = String::new();

    if !options.is_suffix() {
        if let Some(scheme) = c.scheme.as_deref().filter(|s| !s.is_empty()) {
            buf.push_str(scheme);
            buf.push(':');
        }
    }

    let has_authority = c.has_authority();
    if has_authority {
        if !options.is_suffix() {
            buf.push_str("//");
        }
        if let Some(userinfo) = &c.userinfo {
            buf.push_str(userinfo);
            buf.push('@');
        }
        if let Some(host) = &c.host {
            match ip::classify(host) {
                HostKind::Ipv6 => {
                    buf.push('[');
                    match ip::split_ipv6(host) {
                        Some((addr, Some(zone))) => {
                            buf.push_str(addr);
                            buf.push_str("%25");
                            buf.push_str(zone);
                        }
                        _ => buf.push_str(host),
                    }
                    buf.push(']');
                }
                HostKind::IpvFuture => {
                    buf.push('[');
                    buf.push_str(host);
                    buf.push(']');
                }
                // Includes invalid IP literals, still in brackets.
                HostKind::Ipv4 | HostKind::RegName => buf.push_str(host),
            }
        }
        if let Some(port) = &c.port {
            buf.push(':');
            buf.push_str(&port.to_string());
        }
    }

    if has_authority && !c.path.is_empty() && !c.path.starts_with('/') {
        buf.push('/');
    }
    match c.path.strip_prefix("//") {
        Some(rest) if !has_authority => {
            buf.push_str("/%2F");
            buf.push_str(rest);
        }
        _ => buf.push_str(&c.path),
    }

    if let Some(query) = &c.query {
        buf.push('?');
        buf.push_str(query);
    }
    if let Some(fragment) = &c.fragment {
        buf.push('#');
        buf.push_str(fragment);
    }
    buf
}

pub(crate) fn serialize(registry: Option<&Registry>, c: &UriComponents, options: &Options) -> String {
    serialize_owned(registry, c.clone(), options)
}

/// Removes the dot segments `"."` and `".."` from a path.
///
/// This implements the algorithm of [Section 5.2.4 of RFC 3986]. Excess
/// `".."` segments are dropped at the root.
///
/// [Section 5.2.4 of RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986#section-5.2.4
///
/// # Examples
///
/// ```
/// use uri_kit::remove_dot_segments;
///
/// assert_eq!(remove_dot_segments("/a/b/c/./../../g"), "/a/g");
/// assert_eq!(remove_dot_segments("mid/content=5/../6"), "mid/6");
/// assert_eq!(remove_dot_segments("/../g"), "/g");
/// ```
#[must_use]
pub fn remove_dot_segments(path: &str) -> String {
    let mut input = path;
    let mut output: Vec<&str> = Vec::new();

    while !input.is_empty() {
        if let Some(rest) = input
            .strip_prefix("../")
            .or_else(|| input.strip_prefix("./"))
        {
            input = rest;
        } else if input.starts_with("/./") {
            input = &input[2..];
        } else if input == "/." {
            input = "/";
        } else if input.starts_with("/../") {
            input = &input[3..];
            output.pop();
        } else if input == "/.." {
            input = "/";
            output.pop();
        } else if input == "." || input == ".." {
            input = "";
        } else {
            let end = match input.strip_prefix('/') {
                Some(rest) => rest.find('/').map_or(input.len(), |i| i + 1),
                None => input.find('/').unwrap_or(input.len()),
            };
            output.push(&input[..end]);
            input = &input[end..];
        }
    }

    output.concat()
}

pub(crate) fn resolve_components(base: &str, reference: &str, options: &Options) -> UriComponents {
    debug!("resolving {reference:?} against {base:?}");
    let base = parse(None, base, options);
    let r = parse(None, reference, options);
    let mut t = UriComponents::new();

    let same_scheme = match (&r.scheme, &base.scheme) {
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        _ => false,
    };

    if r.scheme.is_some() && !(options.is_tolerant() && same_scheme) {
        t.scheme = r.scheme;
        t.userinfo = r.userinfo;
        t.host = r.host;
        t.port = r.port;
        t.path = remove_dot_segments(&r.path);
        t.query = r.query;
    } else {
        if r.has_authority() {
            t.userinfo = r.userinfo;
            t.host = r.host;
            t.port = r.port;
            t.path = remove_dot_segments(&r.path);
            t.query = r.query;
        } else {
            if r.path.is_empty() {
                t.path = base.path.clone();
                t.query = r.query.or(base.query);
            } else {
                if r.path.starts_with('/') {
                    t.path = remove_dot_segments(&r.path);
                } else {
                    let merged = if base.has_authority() && base.path.is_empty() {
                        format!("/{}", r.path)
                    } else {
                        match base.path.rfind('/') {
                            Some(i) => format!("{}{}", &base.path[..=i], r.path),
                            None => r.path.clone(),
                        }
                    };
                    t.path = remove_dot_segments(&merged);
                }
                t.query = r.query;
            }
            t.userinfo = base.userinfo;
            t.host = base.host;
            t.port = base.port;
        }
        t.scheme = base.scheme.clone();
    }
    t.fragment = r.fragment;

    if let Some(scheme) = &mut t.scheme {
        scheme.make_ascii_lowercase();
    }
    t.reference = t.derive_reference();

    if let Some(e) = r.error.or(base.error) {
        t.set_error(e);
    }
    if base.scheme.is_none() && !options.is_tolerant() {
        t.set_error(UriError::BaseNotAbsolute);
    }
    t
}

pub(crate) fn resolve(base: &str, reference: &str, options: &Options) -> String {
    let t = resolve_components(base, reference, options);
    serialize_owned(None, t, options)
}

pub(crate) fn normalize(registry: Option<&Registry>, input: &str, options: &Options) -> String {
    let options = options.clone().canonical();
    let c = parse(registry, input, &options);
    serialize_owned(registry, c, &options)
}

pub(crate) fn normalize_components(
    registry: Option<&Registry>,
    c: &UriComponents,
    options: &Options,
) -> UriComponents {
    let options = options.clone().canonical();
    let s = serialize(registry, c, &options);
    parse(registry, &s, &options)
}

pub(crate) fn equal(registry: Option<&Registry>, a: &str, b: &str, options: &Options) -> bool {
    normalize(registry, a, options) == normalize(registry, b, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_segments() {
        assert_eq!(remove_dot_segments(""), "");
        assert_eq!(remove_dot_segments("."), "");
        assert_eq!(remove_dot_segments(".."), "");
        assert_eq!(remove_dot_segments("/."), "/");
        assert_eq!(remove_dot_segments("/.."), "/");
        assert_eq!(remove_dot_segments("/b/c/.."), "/b/");
        assert_eq!(remove_dot_segments("/b/c/../../../g"), "/g");
        assert_eq!(remove_dot_segments("/b/c/g."), "/b/c/g.");
        assert_eq!(remove_dot_segments("/b/c/..g"), "/b/c/..g");
        assert_eq!(remove_dot_segments("/b/c/./../g;x=1/./y"), "/b/g;x=1/y");
        assert_eq!(remove_dot_segments("a//b"), "a//b");
    }

    #[test]
    fn recompose_path_safety() {
        let c = UriComponents {
            path: "//x".into(),
            ..UriComponents::default()
        };
        assert_eq!(serialize(None, &c, &Options::new()), "/%2Fx");

        let c = UriComponents {
            host: Some("example.com".into()),
            path: "x".into(),
            ..UriComponents::default()
        };
        assert_eq!(serialize(None, &c, &Options::new()), "//example.com/x");
    }
}
