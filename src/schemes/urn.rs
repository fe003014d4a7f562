use crate::{
    component::{SchemeData, UriComponents},
    error::UriError,
    registry::{Registry, SchemeHandler},
    Options,
};

/// The handler for `urn` ([RFC 2141]).
///
/// Parsing splits the path into a lowercase namespace identifier and a
/// namespace-specific string, then dispatches to the handler registered
/// for `"urn:<nid>"`, if any.
///
/// [RFC 2141]: https://datatracker.ietf.org/doc/html/rfc2141
#[derive(Clone, Copy, Debug)]
pub struct Urn;

fn namespace_key(components: &UriComponents, options: &Options, nid: &str) -> String {
    let scheme = options
        .scheme_override()
        .or(components.scheme.as_deref())
        .unwrap_or("urn");
    format!("{scheme}:{nid}")
}

impl SchemeHandler for Urn {
    fn parse(&self, components: &mut UriComponents, options: &Options, registry: &Registry) {
        let Some((nid, nss)) = components
            .path
            .split_once(':')
            .filter(|(nid, _)| !nid.is_empty())
        else {
            components.set_error(UriError::InvalidUrn);
            return;
        };

        let nid = nid.to_ascii_lowercase();
        let nss = nss.to_owned();
        let key = namespace_key(components, options, &nid);

        components.path.clear();
        components.data = SchemeData::Urn { nid, nss };

        if let Some(handler) = registry.get(&key) {
            handler.parse(components, options, registry);
        }
    }

    fn serialize(&self, components: &mut UriComponents, options: &Options, registry: &Registry) {
        let nid = match &components.data {
            SchemeData::Urn { nid, .. } => nid.clone(),
            SchemeData::UrnUuid { .. } => "uuid".to_owned(),
            _ => return,
        };

        let key = namespace_key(components, options, &nid);
        if let Some(handler) = registry.get(&key) {
            handler.serialize(components, options, registry);
        }

        match std::mem::take(&mut components.data) {
            SchemeData::Urn { nid, nss } => components.path = format!("{nid}:{nss}"),
            SchemeData::UrnUuid { uuid } => components.path = format!("uuid:{uuid}"),
            other => components.data = other,
        }
    }
}
