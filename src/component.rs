//! URI components.

use crate::{error::UriError, pct_enc::table};
use ref_cast::{ref_cast_custom, RefCastCustom};
use std::collections::BTreeMap;

/// A [scheme] component.
///
/// [scheme]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.1
///
/// # Comparison
///
/// `Scheme`s are compared case-insensitively. You should do a case-insensitive
/// comparison if the scheme specification allows both letter cases in the scheme name.
///
/// # Examples
///
/// ```
/// use uri_kit::{component::Scheme, parse, Options};
///
/// const SCHEME_HTTP: &Scheme = Scheme::new_or_panic("http");
///
/// let components = parse("HTTP://EXAMPLE.COM/", &Options::new());
/// let scheme = components.scheme_name().unwrap();
///
/// // Case-insensitive comparison.
/// assert_eq!(scheme, SCHEME_HTTP);
/// // Case-sensitive comparison.
/// assert_eq!(scheme.as_str(), "HTTP");
/// ```
#[derive(RefCastCustom)]
#[repr(transparent)]
pub struct Scheme {
    inner: str,
}

impl Scheme {
    #[ref_cast_custom]
    #[inline]
    pub(crate) const fn new_validated(scheme: &str) -> &Scheme;

    /// Converts a string slice to `&Scheme`.
    ///
    /// # Panics
    ///
    /// Panics if the string is not a valid scheme name according to
    /// [Section 3.1 of RFC 3986][scheme]. For a non-panicking variant,
    /// use [`new`](Self::new).
    ///
    /// [scheme]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.1
    #[inline]
    #[must_use]
    pub const fn new_or_panic(s: &str) -> &Scheme {
        match Self::new(s) {
            Some(scheme) => scheme,
            None => panic!("invalid scheme"),
        }
    }

    /// Converts a string slice to `&Scheme`, returning `None` if the conversion fails.
    #[inline]
    #[must_use]
    pub const fn new(s: &str) -> Option<&Scheme> {
        if matches!(s.as_bytes(), [first, rem @ ..]
        if first.is_ascii_alphabetic() && table::SCHEME.validate(rem))
        {
            Some(Scheme::new_validated(s))
        } else {
            None
        }
    }

    /// Returns the scheme component as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Returns the default port of the scheme, if any is known.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_kit::component::Scheme;
    ///
    /// assert_eq!(Scheme::new_or_panic("HTTPS").default_port(), Some(443));
    /// assert_eq!(Scheme::new_or_panic("urn").default_port(), None);
    /// ```
    #[must_use]
    pub fn default_port(&self) -> Option<u16> {
        const DEFAULT_PORTS: &[(&str, u16)] = &[
            ("ftp", 21),
            ("http", 80),
            ("https", 443),
            ("ws", 80),
            ("wss", 443),
        ];
        DEFAULT_PORTS
            .iter()
            .find(|(name, _)| self.inner.eq_ignore_ascii_case(name))
            .map(|&(_, port)| port)
    }
}

impl PartialEq for Scheme {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.inner.eq_ignore_ascii_case(&other.inner)
    }
}

impl Eq for Scheme {}

/// A [port] subcomponent.
///
/// [port]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.3
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Port {
    /// A decimal port that fits in 16 bits.
    Number(u16),
    /// Anything else, including the empty port of `"http://host:/"`.
    Text(String),
}

impl Port {
    /// Classifies the text following the colon of an authority.
    ///
    /// Returns `Err` with the text if it is neither empty nor a valid 16-bit number.
    pub(crate) fn parse(s: &str) -> Result<Port, Port> {
        if s.is_empty() {
            Ok(Port::Text(String::new()))
        } else if s.bytes().all(|x| x.is_ascii_digit()) {
            s.parse().map(Port::Number).map_err(|_| Port::Text(s.to_owned()))
        } else {
            Err(Port::Text(s.to_owned()))
        }
    }

    /// Returns the port as a number, if it is one.
    #[must_use]
    pub fn as_number(&self) -> Option<u16> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    /// Checks whether the port is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(s) if s.is_empty())
    }
}

impl From<u16> for Port {
    fn from(n: u16) -> Self {
        Self::Number(n)
    }
}

/// The kind of a URI reference, derived from the components present.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Reference {
    /// A reference with nothing but an optional fragment, such as `"#top"`.
    #[default]
    SameDocument,
    /// A reference without a scheme.
    Relative,
    /// A reference with a scheme but no fragment.
    Absolute,
    /// A reference with both a scheme and a fragment.
    Uri,
}

impl Reference {
    /// Returns the lowercase name of the reference kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SameDocument => "same-document",
            Self::Relative => "relative",
            Self::Absolute => "absolute",
            Self::Uri => "uri",
        }
    }
}

/// Data extracted by the `ws` and `wss` scheme handlers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WsData {
    /// Whether the connection is secure.
    pub secure: Option<bool>,
    /// The path and query joined by `"?"`.
    pub resource_name: Option<String>,
}

/// Data extracted by the `mailto` scheme handler.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MailtoData {
    /// The recipients, as `local@domain` addresses.
    pub to: Vec<String>,
    /// Header fields other than `to`, `subject` and `body`.
    pub headers: BTreeMap<String, String>,
    /// The `subject` header field.
    pub subject: Option<String>,
    /// The `body` header field.
    pub body: Option<String>,
}

/// Scheme-specific data attached to [`UriComponents`] by a scheme handler.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SchemeData {
    /// No scheme-specific data.
    #[default]
    None,
    /// Marks components handled by the `http` or `https` handler.
    Http,
    /// `ws` and `wss` data.
    Ws(WsData),
    /// `mailto` data.
    Mailto(MailtoData),
    /// A URN split into its namespace identifier and namespace-specific string.
    Urn {
        /// The namespace identifier, lowercased.
        nid: String,
        /// The namespace-specific string.
        nss: String,
    },
    /// A `urn:uuid` reference.
    UrnUuid {
        /// The UUID text.
        uuid: String,
    },
    /// Free-form data for user-registered handlers.
    Custom(BTreeMap<String, String>),
}

/// The decomposed form of a URI reference.
///
/// All component values are kept in their percent-encoded form. A host
/// never carries the brackets of an IP literal, and the zone identifier
/// of an IPv6 address follows a bare `%`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UriComponents {
    /// The scheme, without the trailing colon.
    pub scheme: Option<String>,
    /// The userinfo subcomponent.
    pub userinfo: Option<String>,
    /// The host subcomponent.
    pub host: Option<String>,
    /// The port subcomponent.
    pub port: Option<Port>,
    /// The path, possibly empty.
    pub path: String,
    /// The query, without the leading question mark.
    pub query: Option<String>,
    /// The fragment, without the leading number sign.
    pub fragment: Option<String>,
    /// The kind of reference, set by parsing.
    pub reference: Reference,
    /// The first error encountered, if any.
    pub error: Option<UriError>,
    /// Data attached by a scheme handler.
    pub data: SchemeData,
}

impl UriComponents {
    /// Creates an empty same-document reference.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the scheme as a [`Scheme`], if present and valid.
    #[must_use]
    pub fn scheme_name(&self) -> Option<&Scheme> {
        self.scheme.as_deref().and_then(Scheme::new)
    }

    /// Checks whether an authority component is present.
    #[must_use]
    pub fn has_authority(&self) -> bool {
        self.userinfo.is_some() || self.host.is_some() || self.port.is_some()
    }

    /// Records an error, unless one is already recorded.
    pub fn set_error(&mut self, e: impl Into<UriError>) {
        if self.error.is_none() {
            self.error = Some(e.into());
        }
    }

    /// Derives the kind of reference from the components present.
    pub(crate) fn derive_reference(&self) -> Reference {
        if self.scheme.is_none() {
            if !self.has_authority() && self.path.is_empty() && self.query.is_none() {
                Reference::SameDocument
            } else {
                Reference::Relative
            }
        } else if self.fragment.is_none() {
            Reference::Absolute
        } else {
            Reference::Uri
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_validation() {
        assert!(Scheme::new("a+b-c.d").is_some());
        assert!(Scheme::new("1ab").is_none());
        assert!(Scheme::new("").is_none());
        assert!(Scheme::new("a b").is_none());
        assert_eq!(Scheme::new_or_panic("WS").default_port(), Some(80));
    }

    #[test]
    fn port_classification() {
        assert_eq!(Port::parse(""), Ok(Port::Text(String::new())));
        assert_eq!(Port::parse("080"), Ok(Port::Number(80)));
        assert_eq!(Port::parse("65536"), Err(Port::Text("65536".into())));
        assert_eq!(Port::parse("8x"), Err(Port::Text("8x".into())));
    }

    #[test]
    fn reference_kinds() {
        let mut c = UriComponents::new();
        assert_eq!(c.derive_reference(), Reference::SameDocument);
        c.fragment = Some("top".into());
        assert_eq!(c.derive_reference(), Reference::SameDocument);
        c.host = Some(String::new());
        assert_eq!(c.derive_reference(), Reference::Relative);
        c.scheme = Some("uri".into());
        assert_eq!(c.derive_reference(), Reference::Uri);
        c.fragment = None;
        assert_eq!(c.derive_reference(), Reference::Absolute);
    }
}
