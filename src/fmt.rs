use crate::{
    component::{Port, Reference, Scheme},
    error::{ParseError, ParseErrorKind, UriError},
};
use std::fmt;

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self.kind {
            ParseErrorKind::InvalidOctet => "invalid percent-encoded octet at index ",
            ParseErrorKind::UnexpectedChar => "unexpected character at index ",
            ParseErrorKind::InvalidIpLiteral => "invalid IP literal at index ",
        };
        write!(f, "{}{}", msg, self.index)
    }
}

impl fmt::Display for UriError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => fmt::Display::fmt(e, f),
            Self::InvalidPort(port) => write!(f, "invalid port {port:?}"),
            Self::ReferenceMismatch { expected, found } => {
                write!(f, "expected {expected} reference, found {found} reference")
            }
            Self::MissingHost => f.write_str("host must be provided"),
            Self::Idna { domain, to_ascii } => {
                let direction = if *to_ascii { "ASCII" } else { "Unicode" };
                write!(f, "domain {domain:?} could not be converted to {direction}")
            }
            Self::InvalidUrn => f.write_str("URN can not be parsed"),
            Self::InvalidUuid => f.write_str("UUID is not valid"),
            Self::BaseNotAbsolute => f.write_str("base must have a scheme"),
        }
    }
}

impl fmt::Display for Scheme {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

impl fmt::Debug for Scheme {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => fmt::Display::fmt(n, f),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl fmt::Display for Reference {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
