//! Decomposition of a URI reference into raw component spans.
//!
//! Decomposition follows the regular expression of [Appendix B of RFC 3986]
//! and never fails: every string splits into components, and the syntax
//! of each component is checked afterwards.
//!
//! [Appendix B of RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986#appendix-B

use crate::error::{ParseError, ParseErrorKind};
use std::ops::Range;

pub(crate) struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Reader { bytes, pos: 0 }
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn has_remaining(&self) -> bool {
        self.pos < self.bytes.len()
    }

    pub(crate) fn peek(&self, i: usize) -> Option<u8> {
        self.bytes.get(self.pos + i).copied()
    }

    pub(crate) fn skip(&mut self, n: usize) {
        // INVARIANT: `pos` is non-decreasing.
        self.pos += n;
        debug_assert!(self.pos <= self.bytes.len());
    }

    pub(crate) fn read_str(&mut self, s: &str) -> bool {
        if self.bytes[self.pos..].starts_with(s.as_bytes()) {
            self.skip(s.len());
            true
        } else {
            false
        }
    }

    /// Reads until one of the delimiters or the end, returning the span read.
    fn read_until(&mut self, delims: &[u8]) -> Range<usize> {
        let start = self.pos;
        let len = self.bytes[start..]
            .iter()
            .position(|x| delims.contains(x))
            .unwrap_or(self.bytes.len() - start);
        self.skip(len);
        start..self.pos
    }
}

/// The spans of the components of a URI reference.
#[derive(Debug, Default)]
pub(crate) struct RawRef {
    pub(crate) scheme: Option<Range<usize>>,
    pub(crate) userinfo: Option<Range<usize>>,
    pub(crate) host: Option<Range<usize>>,
    pub(crate) port: Option<Range<usize>>,
    pub(crate) path: Range<usize>,
    pub(crate) query: Option<Range<usize>>,
    pub(crate) fragment: Option<Range<usize>>,
    /// An error found while splitting the authority.
    pub(crate) error: Option<ParseError>,
}

/// Splits a URI reference into its components.
pub(crate) fn decompose(s: &str) -> RawRef {
    let bytes = s.as_bytes();
    let mut reader = Reader::new(bytes);
    let mut out = RawRef::default();

    let scheme = reader.read_until(b":/?#");
    if !scheme.is_empty() && reader.peek(0) == Some(b':') {
        out.scheme = Some(scheme);
        reader.skip(1);
    } else {
        reader = Reader::new(bytes);
    }

    if reader.read_str("//") {
        let authority = reader.read_until(b"/?#");
        split_authority(bytes, authority, &mut out);
    }

    out.path = reader.read_until(b"?#");

    if reader.read_str("?") {
        out.query = Some(reader.read_until(b"#"));
    }
    if reader.read_str("#") {
        out.fragment = Some(reader.pos()..bytes.len());
    }
    out
}

fn split_authority(bytes: &[u8], authority: Range<usize>, out: &mut RawRef) {
    let auth = &bytes[authority.clone()];

    let host_start = match auth.iter().position(|&x| x == b'@') {
        Some(i) => {
            out.userinfo = Some(authority.start..authority.start + i);
            authority.start + i + 1
        }
        None => authority.start,
    };
    let host_part = &bytes[host_start..authority.end];

    if host_part.first() == Some(&b'[') {
        if let Some(i) = host_part.iter().position(|&x| x == b']') {
            let host_end = host_start + i + 1;
            match bytes.get(host_end..authority.end) {
                Some([]) | None => {}
                Some([b':', ..]) => out.port = Some(host_end + 1..authority.end),
                Some(_) => {
                    out.error = Some(ParseError::new(host_end, ParseErrorKind::UnexpectedChar));
                    out.host = Some(host_start..authority.end);
                    return;
                }
            }
            out.host = Some(host_start..host_end);
            return;
        }
    }

    match host_part.iter().position(|&x| x == b':') {
        Some(i) => {
            out.host = Some(host_start..host_start + i);
            out.port = Some(host_start + i + 1..authority.end);
        }
        None => out.host = Some(host_start..authority.end),
    }
}
