//! Scheme handlers and the registry dispatching to them.

use crate::{
    component::UriComponents,
    engine,
    schemes::{Http, Mailto, Urn, UrnUuid, Ws},
    Options,
};
use std::{collections::HashMap, fmt, sync::OnceLock};

/// Scheme-specific processing plugged into parsing and serialization.
///
/// A handler sees the components after the generic syntax has been
/// applied when parsing, and before it is applied when serializing.
pub trait SchemeHandler: Send + Sync {
    /// Whether hosts of this scheme are domain names, converted with IDNA.
    fn domain_host(&self) -> bool {
        false
    }

    /// Refines parsed components in place.
    ///
    /// The registry is passed along so that a handler may dispatch to
    /// sub-handlers, as `urn` does for its namespaces.
    fn parse(&self, components: &mut UriComponents, options: &Options, registry: &Registry);

    /// Prepares components for serialization in place.
    fn serialize(&self, components: &mut UriComponents, options: &Options, registry: &Registry);
}

/// A table of scheme handlers, keyed by lowercase scheme name.
///
/// Keys of `urn` namespace handlers take the form `"urn:<nid>"`.
///
/// # Examples
///
/// ```
/// use uri_kit::{Options, Registry, SchemeHandler, UriComponents};
///
/// struct Shout;
///
/// impl SchemeHandler for Shout {
///     fn parse(&self, components: &mut UriComponents, _: &Options, _: &Registry) {
///         components.path.make_ascii_uppercase();
///     }
///
///     fn serialize(&self, _: &mut UriComponents, _: &Options, _: &Registry) {}
/// }
///
/// let mut registry = Registry::with_builtins();
/// registry.register_scheme("shout", Shout);
///
/// let components = registry.parse("SHOUT:hello", &Options::new());
/// assert_eq!(components.path, "HELLO");
/// ```
#[derive(Default)]
pub struct Registry {
    handlers: HashMap<String, Box<dyn SchemeHandler>>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in handlers: `http`, `https`,
    /// `ws`, `wss`, `mailto`, `urn` and `urn:uuid`.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry
            .register_scheme("http", Http::HTTP)
            .register_scheme("https", Http::HTTPS)
            .register_scheme("ws", Ws::WS)
            .register_scheme("wss", Ws::WSS)
            .register_scheme("mailto", Mailto)
            .register_scheme("urn", Urn)
            .register_scheme("urn:uuid", UrnUuid);
        registry
    }

    /// Returns the shared registry with the built-in handlers.
    pub fn builtin() -> &'static Registry {
        static BUILTIN: OnceLock<Registry> = OnceLock::new();
        BUILTIN.get_or_init(Registry::with_builtins)
    }

    /// Registers a handler for a scheme, replacing any previous one.
    pub fn register_scheme(
        &mut self,
        scheme: &str,
        handler: impl SchemeHandler + 'static,
    ) -> &mut Self {
        self.handlers
            .insert(scheme.to_ascii_lowercase(), Box::new(handler));
        self
    }

    /// Returns the handler for a scheme, matched case-insensitively.
    #[must_use]
    pub fn get(&self, scheme: &str) -> Option<&dyn SchemeHandler> {
        self.handlers
            .get(&scheme.to_ascii_lowercase())
            .map(|handler| &**handler)
    }

    /// Checks whether a handler is registered for a scheme.
    #[must_use]
    pub fn contains(&self, scheme: &str) -> bool {
        self.get(scheme).is_some()
    }

    /// Parses a URI reference into its components.
    ///
    /// See [`parse`](crate::parse).
    #[must_use]
    pub fn parse(&self, input: &str, options: &Options) -> UriComponents {
        engine::parse(Some(self), input, options)
    }

    /// Serializes components into a URI reference.
    ///
    /// See [`serialize`](crate::serialize).
    #[must_use]
    pub fn serialize(&self, components: &UriComponents, options: &Options) -> String {
        engine::serialize(Some(self), components, options)
    }

    /// Resolves a reference against a base.
    ///
    /// Resolution works on the generic syntax only and does not involve
    /// any handler. See [`resolve`](crate::resolve).
    #[must_use]
    pub fn resolve(&self, base: &str, reference: &str, options: &Options) -> String {
        engine::resolve(base, reference, options)
    }

    /// Resolves a reference against a base, returning the components.
    #[must_use]
    pub fn resolve_components(&self, base: &str, reference: &str, options: &Options) -> UriComponents {
        engine::resolve_components(base, reference, options)
    }

    /// Normalizes a URI reference.
    ///
    /// See [`normalize`](crate::normalize).
    #[must_use]
    pub fn normalize(&self, input: &str, options: &Options) -> String {
        engine::normalize(Some(self), input, options)
    }

    /// Normalizes components by serializing and parsing them again.
    #[must_use]
    pub fn normalize_components(&self, components: &UriComponents, options: &Options) -> UriComponents {
        engine::normalize_components(Some(self), components, options)
    }

    /// Checks whether two URI references are equivalent.
    ///
    /// See [`equal`](crate::equal).
    #[must_use]
    pub fn equal(&self, a: &str, b: &str, options: &Options) -> bool {
        engine::equal(Some(self), a, b, options)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut schemes: Vec<_> = self.handlers.keys().collect();
        schemes.sort();
        f.debug_struct("Registry").field("schemes", &schemes).finish()
    }
}
