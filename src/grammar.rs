//! Per-component character classes for URIs and IRIs.

use crate::pct_enc::table::{self, Table};

/// The characters kept literally in each component.
///
/// Characters outside a component's table are percent-encoded when a
/// component is normalized. There is one grammar for URIs and one for
/// IRIs, the latter also allowing `ucschar`, and `iprivate` in queries.
#[derive(Clone, Copy, Debug)]
#[non_exhaustive]
pub struct Grammar {
    /// The characters following the first letter of a scheme.
    pub scheme: Table,
    /// The userinfo subcomponent.
    pub userinfo: Table,
    /// A registered name or IPv4 address.
    pub host: Table,
    /// The path of a reference with a scheme.
    pub path: Table,
    /// The path of a reference without a scheme.
    pub path_noscheme: Table,
    /// The query.
    pub query: Table,
    /// The fragment.
    pub fragment: Table,
    /// The characters left alone by [`escape_component`](crate::escape_component).
    pub escape: Table,
    /// The characters decoded when found percent-encoded.
    pub unreserved: Table,
}

static URI: Grammar = Grammar {
    scheme: table::SCHEME,
    userinfo: table::USERINFO,
    host: table::HOST,
    path: table::PATH,
    path_noscheme: table::PATH_NOSCHEME,
    query: table::QUERY,
    fragment: table::FRAGMENT,
    escape: table::UNRESERVED.or(table::SUB_DELIMS),
    unreserved: table::UNRESERVED,
};

static IRI: Grammar = Grammar {
    scheme: table::SCHEME,
    userinfo: table::IUSERINFO,
    host: table::IHOST,
    path: table::IPATH,
    path_noscheme: table::IPATH_NOSCHEME,
    query: table::IQUERY,
    fragment: table::IFRAGMENT,
    escape: table::IUNRESERVED.or(table::SUB_DELIMS),
    unreserved: table::IUNRESERVED,
};

impl Grammar {
    /// Returns the grammar for IRIs if `iri` is set, or for URIs otherwise.
    #[must_use]
    pub fn get(iri: bool) -> &'static Grammar {
        if iri {
            &IRI
        } else {
            &URI
        }
    }
}
