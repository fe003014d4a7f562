use crate::Reference;

/// Options controlling parsing, serialization and resolution.
///
/// Options are built by chaining setters on [`Options::new`].
///
/// # Examples
///
/// ```
/// use uri_kit::{serialize, Options, UriComponents};
///
/// let components = UriComponents {
///     scheme: Some("uri".to_owned()),
///     host: Some("xn--99zt52a.example.org".to_owned()),
///     ..UriComponents::default()
/// };
/// let options = Options::new().iri(true).domain_host(true);
/// assert_eq!(serialize(&components, &options), "uri://納豆.example.org");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Options {
    scheme: Option<String>,
    reference: Option<Reference>,
    tolerant: bool,
    iri: bool,
    unicode_support: bool,
    domain_host: bool,
    suffix: bool,
    #[cfg_attr(feature = "serde", serde(skip))]
    canonical: bool,
}

impl Options {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the scheme used to select a scheme handler, overriding the parsed one.
    #[must_use]
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    /// Sets the kind of reference the input is expected to be.
    ///
    /// A mismatch is recorded as an error when parsing.
    #[must_use]
    pub fn reference(mut self, reference: Reference) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Sets whether to relax validation.
    ///
    /// This defaults to `false`. When set, invalid ports and UUIDs are not
    /// reported, and a reference such as `"http:g"` is resolved against an
    /// `http` base as if it were `"g"`.
    #[must_use]
    pub fn tolerant(mut self, value: bool) -> Self {
        self.tolerant = value;
        self
    }

    /// Sets whether to produce IRIs, keeping non-ASCII characters literal.
    #[must_use]
    pub fn iri(mut self, value: bool) -> Self {
        self.iri = value;
        self
    }

    /// Sets whether the input may hold literal non-ASCII characters.
    ///
    /// When set, parsing keeps such characters and skips the ASCII
    /// conversion of domain names.
    #[must_use]
    pub fn unicode_support(mut self, value: bool) -> Self {
        self.unicode_support = value;
        self
    }

    /// Sets whether to treat every host as a domain name, regardless of the scheme.
    #[must_use]
    pub fn domain_host(mut self, value: bool) -> Self {
        self.domain_host = value;
        self
    }

    /// Sets whether the input is the suffix of a reference, starting at the authority.
    ///
    /// Serialization then omits the scheme and the `"//"` prefix.
    #[must_use]
    pub fn suffix(mut self, value: bool) -> Self {
        self.suffix = value;
        self
    }

    pub(crate) fn canonical(mut self) -> Self {
        self.canonical = true;
        self
    }

    /// Returns the scheme set with [`scheme`](Self::scheme).
    #[must_use]
    pub fn scheme_override(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// Returns the reference kind set with [`reference`](Self::reference).
    #[must_use]
    pub fn expected_reference(&self) -> Option<Reference> {
        self.reference
    }

    /// Returns whether validation is relaxed.
    #[must_use]
    pub fn is_tolerant(&self) -> bool {
        self.tolerant
    }

    /// Returns whether IRIs are produced.
    #[must_use]
    pub fn is_iri(&self) -> bool {
        self.iri
    }

    /// Returns whether the input may hold literal non-ASCII characters.
    #[must_use]
    pub fn has_unicode_support(&self) -> bool {
        self.unicode_support
    }

    /// Returns whether every host is treated as a domain name.
    #[must_use]
    pub fn is_domain_host(&self) -> bool {
        self.domain_host
    }

    /// Returns whether the input starts at the authority.
    #[must_use]
    pub fn is_suffix(&self) -> bool {
        self.suffix
    }

    pub(crate) fn is_canonical(&self) -> bool {
        self.canonical
    }
}
