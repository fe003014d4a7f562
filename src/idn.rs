//! Conversion of domain names between Unicode and ASCII (Punycode) forms.

use crate::{error::UriError, log::warning};

/// Converts a domain name to its ASCII form, as in `"xn--99zt52a.example.org"`.
pub(crate) fn to_ascii(domain: &str) -> Result<String, UriError> {
    idna::domain_to_ascii(domain).map_err(|_| {
        warning!("failed to convert {domain:?} to ASCII");
        UriError::Idna {
            domain: domain.to_owned(),
            to_ascii: true,
        }
    })
}

/// Converts a domain name to its Unicode form.
///
/// Labels that fail to decode are kept as they are, and an error is returned
/// alongside the best-effort result.
pub(crate) fn to_unicode(domain: &str) -> (String, Option<UriError>) {
    let (out, result) = idna::domain_to_unicode(domain);
    let error = result.err().map(|_| {
        warning!("failed to convert {domain:?} to Unicode");
        UriError::Idna {
            domain: domain.to_owned(),
            to_ascii: false,
        }
    });
    (out, error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_labels() {
        assert_eq!(to_ascii("納豆.example.org").unwrap(), "xn--99zt52a.example.org");
        assert_eq!(to_ascii("ABC.com").unwrap(), "abc.com");
        assert_eq!(to_unicode("xn--99zt52a.example.org").0, "納豆.example.org");
        assert_eq!(to_unicode("example.org").1, None);
    }
}
