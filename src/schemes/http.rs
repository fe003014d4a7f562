use crate::{
    component::{Port, SchemeData, UriComponents},
    error::UriError,
    registry::{Registry, SchemeHandler},
    Options,
};

/// The handler for `http` and `https` ([RFC 7230]).
///
/// Parsing requires a non-empty host and lowercases it. Serialization
/// drops the default or an empty port, and writes an empty path as `"/"`.
///
/// [RFC 7230]: https://datatracker.ietf.org/doc/html/rfc7230#section-2.7
#[derive(Clone, Copy, Debug)]
pub struct Http {
    default_port: u16,
}

impl Http {
    /// The handler for `http`.
    pub const HTTP: Http = Http { default_port: 80 };
    /// The handler for `https`.
    pub const HTTPS: Http = Http { default_port: 443 };
}

impl SchemeHandler for Http {
    fn domain_host(&self) -> bool {
        true
    }

    fn parse(&self, components: &mut UriComponents, _options: &Options, _registry: &Registry) {
        match &mut components.host {
            Some(host) if !host.is_empty() => host.make_ascii_lowercase(),
            _ => components.set_error(UriError::MissingHost),
        }
        components.data = SchemeData::Http;
    }

    fn serialize(&self, components: &mut UriComponents, _options: &Options, _registry: &Registry) {
        let default_port = components
            .scheme_name()
            .and_then(|scheme| scheme.default_port())
            .unwrap_or(self.default_port);

        let drop_port = match &components.port {
            Some(Port::Number(n)) => *n == default_port,
            Some(port) => port.is_empty(),
            None => false,
        };
        if drop_port {
            components.port = None;
        }

        if components.path.is_empty() {
            components.path.push('/');
        }
        components.data = SchemeData::None;
    }
}
