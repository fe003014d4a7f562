use crate::{
    component::{SchemeData, UriComponents},
    error::UriError,
    registry::{Registry, SchemeHandler},
    Options,
};

/// The handler for the `uuid` namespace of `urn` ([RFC 4122]).
///
/// Parsing moves the namespace-specific string into
/// [`SchemeData::UrnUuid`] and checks its syntax unless tolerant.
/// Serialization lowercases the UUID.
///
/// [RFC 4122]: https://datatracker.ietf.org/doc/html/rfc4122#section-3
#[derive(Clone, Copy, Debug)]
pub struct UrnUuid;

/// Checks for the `8-4-4-4-12` hexadecimal form.
fn is_uuid(s: &str) -> bool {
    const GROUPS: [usize; 5] = [8, 4, 4, 4, 12];

    let mut parts = s.split('-');
    GROUPS.iter().all(|&len| {
        parts
            .next()
            .is_some_and(|part| part.len() == len && part.bytes().all(|x| x.is_ascii_hexdigit()))
    }) && parts.next().is_none()
}

impl SchemeHandler for UrnUuid {
    fn parse(&self, components: &mut UriComponents, options: &Options, _registry: &Registry) {
        let uuid = match std::mem::take(&mut components.data) {
            SchemeData::Urn { nss, .. } => nss,
            SchemeData::UrnUuid { uuid } => uuid,
            other => {
                components.data = other;
                return;
            }
        };

        if !options.is_tolerant() && !is_uuid(&uuid) {
            components.set_error(UriError::InvalidUuid);
        }
        components.data = SchemeData::UrnUuid { uuid };
    }

    fn serialize(&self, components: &mut UriComponents, _options: &Options, _registry: &Registry) {
        let uuid = match std::mem::take(&mut components.data) {
            SchemeData::UrnUuid { uuid } => uuid,
            SchemeData::Urn { nss, .. } => nss,
            other => {
                components.data = other;
                return;
            }
        };
        components.data = SchemeData::Urn {
            nid: "uuid".to_owned(),
            nss: uuid.to_ascii_lowercase(),
        };
    }
}
