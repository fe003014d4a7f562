//! Error types.

/// Detailed cause of a [`ParseError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParseErrorKind {
    /// Invalid percent-encoded octet that is either non-hexadecimal or incomplete.
    ///
    /// The error index points to the percent character "%" of the octet.
    InvalidOctet,
    /// Unexpected character that is not allowed by the URI syntax.
    ///
    /// The error index points to the character.
    UnexpectedChar,
    /// Invalid IP literal address.
    ///
    /// The error index points to the preceding left square bracket "[".
    InvalidIpLiteral,
}

/// A syntax error found when parsing a URI reference.
///
/// Parsing never fails as a whole: the error is recorded on the
/// resulting [`UriComponents`](crate::UriComponents) instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParseError {
    pub(crate) index: usize,
    pub(crate) kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(index: usize, kind: ParseErrorKind) -> Self {
        Self { index, kind }
    }

    /// Returns the byte index in the input at which the error occurred.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the detailed cause of the error.
    #[must_use]
    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }
}

impl std::error::Error for ParseError {}

/// An error recorded on a [`UriComponents`](crate::UriComponents).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UriError {
    /// The reference does not follow the generic syntax.
    Parse(ParseError),
    /// The port is neither empty nor a decimal number that fits in 16 bits.
    InvalidPort(String),
    /// The kind of reference differs from the one the caller expected.
    ReferenceMismatch {
        /// The kind of reference expected.
        expected: crate::Reference,
        /// The kind of reference found.
        found: crate::Reference,
    },
    /// A scheme that requires a host was given none.
    MissingHost,
    /// A domain name could not be converted.
    Idna {
        /// The domain name, percent-decoded.
        domain: String,
        /// Whether the conversion was to ASCII.
        to_ascii: bool,
    },
    /// A `urn` reference has no namespace identifier.
    InvalidUrn,
    /// A `urn:uuid` reference does not carry a well-formed UUID.
    InvalidUuid,
    /// A reference was resolved against a base without a scheme.
    BaseNotAbsolute,
}

impl From<ParseError> for UriError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl std::error::Error for UriError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}
