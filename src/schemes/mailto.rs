use crate::{
    component::{MailtoData, SchemeData, UriComponents},
    idn,
    pct_enc::{
        self,
        table::{self, Table},
    },
    registry::{Registry, SchemeHandler},
    Options,
};

/// `atext` from RFC 5322, with `"."`, the quote and the other visible
/// characters that may appear in a quoted local part.
const LOCAL_PART: Table = table::ALPHA
    .or(table::DIGIT)
    .or(Table::new(b"!$'()*+,-.<>^_`{|}~\"\\"));

/// `unreserved` and `some-delims` from RFC 6068, for header field names and values.
///
/// Non-ASCII characters are left for the generic syntax to encode.
const HFIELD: Table = table::IUNRESERVED.or(Table::new(b"!$'()*+,;:@"));

/// The handler for `mailto` ([RFC 6068]).
///
/// Parsing splits the recipients and header fields into [`MailtoData`],
/// decoding them. Serialization encodes them back into the path and query.
///
/// [RFC 6068]: https://datatracker.ietf.org/doc/html/rfc6068
#[derive(Clone, Copy, Debug)]
pub struct Mailto;

fn split_list(s: &str) -> impl Iterator<Item = String> + '_ {
    s.split(',').filter(|a| !a.is_empty()).map(str::to_owned)
}

fn domain_to_ascii(components: &mut UriComponents, domain: String) -> String {
    match idn::to_ascii(&domain) {
        Ok(ascii) => ascii,
        Err(e) => {
            components.set_error(e);
            domain
        }
    }
}

fn encode_field(s: &str) -> String {
    let mut buf = String::with_capacity(s.len());
    pct_enc::normalize_component(&mut buf, s, HFIELD, table::UNRESERVED, false);
    buf
}

impl SchemeHandler for Mailto {
    fn parse(&self, components: &mut UriComponents, options: &Options, _registry: &Registry) {
        let mut data = MailtoData {
            to: split_list(&components.path).collect(),
            ..MailtoData::default()
        };
        components.path.clear();

        if let Some(query) = components.query.take().filter(|q| !q.is_empty()) {
            for field in query.split('&') {
                let (name, value) = field.split_once('=').unwrap_or((field, ""));
                if name.eq_ignore_ascii_case("to") {
                    data.to.extend(split_list(value));
                } else if name.eq_ignore_ascii_case("subject") {
                    data.subject = Some(pct_enc::unescape_component(value));
                } else if name.eq_ignore_ascii_case("body") {
                    data.body = Some(pct_enc::unescape_component(value));
                } else {
                    data.headers.insert(
                        pct_enc::unescape_component(name),
                        pct_enc::unescape_component(value),
                    );
                }
            }
        }

        for addr in &mut data.to {
            *addr = match addr.rsplit_once('@') {
                Some((local, domain)) => {
                    let local = pct_enc::unescape_component(local);
                    let mut domain = pct_enc::unescape_component(domain).to_lowercase();
                    if !options.has_unicode_support() {
                        domain = domain_to_ascii(components, domain);
                    }
                    format!("{local}@{domain}")
                }
                None => pct_enc::unescape_component(addr),
            };
        }

        components.data = SchemeData::Mailto(data);
    }

    fn serialize(&self, components: &mut UriComponents, options: &Options, _registry: &Registry) {
        let data = match std::mem::take(&mut components.data) {
            SchemeData::Mailto(data) => data,
            other => {
                components.data = other;
                return;
            }
        };

        let mut to = Vec::with_capacity(data.to.len());
        for addr in &data.to {
            let (local, domain) = match addr.rsplit_once('@') {
                Some((local, domain)) => (local, Some(domain)),
                None => (addr.as_str(), None),
            };

            let mut encoded = String::with_capacity(addr.len());
            pct_enc::normalize_component(
                &mut encoded,
                local,
                LOCAL_PART,
                table::UNRESERVED,
                false,
            );

            if let Some(domain) = domain {
                let domain = if options.is_iri() {
                    let (unicode, error) = idn::to_unicode(domain);
                    if let Some(e) = error {
                        components.set_error(e);
                    }
                    unicode
                } else {
                    let domain = pct_enc::unescape_component(domain).to_lowercase();
                    domain_to_ascii(components, domain)
                };
                encoded.push('@');
                encoded.push_str(&domain);
            }
            to.push(encoded);
        }
        components.path = to.join(",");

        let mut fields: Vec<(&str, &str)> = data
            .headers
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();
        if let Some(subject) = data.subject.as_deref().filter(|s| !s.is_empty()) {
            fields.push(("subject", subject));
        }
        if let Some(body) = data.body.as_deref().filter(|s| !s.is_empty()) {
            fields.push(("body", body));
        }

        if !fields.is_empty() {
            let query: Vec<String> = fields
                .into_iter()
                .map(|(name, value)| {
                    format!("{}={}", encode_field(name), encode_field(value))
                })
                .collect();
            components.query = Some(query.join("&"));
        }
    }
}
