use crate::{
    component::{Port, SchemeData, UriComponents, WsData},
    registry::{Registry, SchemeHandler},
    Options,
};

/// The handler for `ws` and `wss` ([RFC 6455]).
///
/// Parsing moves the path and query into a resource name and records
/// whether the connection is secure. Serialization drops the default or
/// an empty port, and always drops the fragment.
///
/// [RFC 6455]: https://datatracker.ietf.org/doc/html/rfc6455#section-3
#[derive(Clone, Copy, Debug)]
pub struct Ws {
    secure: bool,
}

impl Ws {
    /// The handler for `ws`.
    pub const WS: Ws = Ws { secure: false };
    /// The handler for `wss`.
    pub const WSS: Ws = Ws { secure: true };

    fn is_secure(&self, components: &UriComponents) -> bool {
        match components.scheme.as_deref() {
            Some(scheme) => scheme.eq_ignore_ascii_case("wss"),
            None => self.secure,
        }
    }
}

impl SchemeHandler for Ws {
    fn domain_host(&self) -> bool {
        true
    }

    fn parse(&self, components: &mut UriComponents, _options: &Options, _registry: &Registry) {
        let secure = self.is_secure(components);

        let mut resource_name = std::mem::take(&mut components.path);
        if resource_name.is_empty() {
            resource_name.push('/');
        }
        if let Some(query) = components.query.take().filter(|q| !q.is_empty()) {
            resource_name.push('?');
            resource_name.push_str(&query);
        }

        components.data = SchemeData::Ws(WsData {
            secure: Some(secure),
            resource_name: Some(resource_name),
        });
    }

    fn serialize(&self, components: &mut UriComponents, _options: &Options, _registry: &Registry) {
        let data = match std::mem::take(&mut components.data) {
            SchemeData::Ws(data) => data,
            _ => WsData::default(),
        };
        let secure = data.secure.unwrap_or_else(|| self.is_secure(components));

        let default_port = if secure { 443 } else { 80 };
        let drop_port = match &components.port {
            Some(Port::Number(n)) => *n == default_port,
            Some(port) => port.is_empty(),
            None => false,
        };
        if drop_port {
            components.port = None;
        }

        if let Some(secure) = data.secure {
            components.scheme = Some(if secure { "wss" } else { "ws" }.to_owned());
        }

        if let Some(resource_name) = data.resource_name {
            let (path, query) = match resource_name.split_once('?') {
                Some((path, query)) => (path, Some(query)),
                None => (resource_name.as_str(), None),
            };
            components.path = if path == "/" {
                String::new()
            } else {
                path.to_owned()
            };
            components.query = query.map(str::to_owned);
        }

        components.fragment = None;
    }
}
