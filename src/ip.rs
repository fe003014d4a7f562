//! IP address recognition and canonicalization.
//!
//! IPv4 octets are read leniently: leading zeros are accepted, as in
//! `192.068.001.000`, and dropped in the canonical form. IPv6 addresses
//! are written in the text representation of [RFC 5952].
//!
//! [RFC 5952]: https://datatracker.ietf.org/doc/html/rfc5952

use crate::{
    parser::Reader,
    pct_enc::{
        is_hexdig_pair,
        table::{HEXDIG, IPV_FUTURE, ZONE_ID},
    },
};
use std::fmt::Write;

/// The kind of a host subcomponent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostKind {
    /// A dotted-decimal IPv4 address.
    Ipv4,
    /// An IPv6 address, possibly with a zone identifier.
    Ipv6,
    /// An address of a future version, such as `"v7.addr"`.
    IpvFuture,
    /// A registered name.
    RegName,
}

enum Seg {
    // *1":" 1*4HEXDIG
    Normal(u16, bool),
    // "::"
    Ellipsis,
    // *1":" 1*4HEXDIG "."
    MaybeV4(bool),
    // ":"
    SingleColon,
}

/// A parsed IPv6 address.
struct V6 {
    segs: [u16; 8],
    // Whether the last 32 bits were written in dotted-decimal form.
    v4_tail: bool,
}

impl Reader<'_> {
    fn read_v6(&mut self) -> Option<V6> {
        let mut segs = [0; 8];
        let mut ellipsis_i = 8;
        let mut v4_tail = false;

        let mut i = 0;
        while i < 8 {
            match self.read_v6_segment() {
                Some(Seg::Normal(seg, colon)) => {
                    if colon == (i == 0 || i == ellipsis_i) {
                        // Leading colon, triple colons, or no colon.
                        return None;
                    }
                    segs[i] = seg;
                    i += 1;
                }
                Some(Seg::Ellipsis) => {
                    if ellipsis_i != 8 {
                        // Multiple ellipses.
                        return None;
                    }
                    ellipsis_i = i;
                }
                Some(Seg::MaybeV4(colon)) => {
                    if i > 6 || colon == (i == ellipsis_i) {
                        // Not enough space, triple colons, or no colon.
                        return None;
                    }
                    let octets = self.read_v4()?;
                    segs[i] = u16::from_be_bytes([octets[0], octets[1]]);
                    segs[i + 1] = u16::from_be_bytes([octets[2], octets[3]]);
                    i += 2;
                    v4_tail = true;
                    break;
                }
                Some(Seg::SingleColon) => return None,
                None => break,
            }
        }

        if ellipsis_i == 8 {
            // No ellipsis.
            if i != 8 {
                // Too short.
                return None;
            }
        } else if i == 8 {
            // Eliding nothing.
            return None;
        } else {
            // Shift the segments after the ellipsis to the right.
            for j in (ellipsis_i..i).rev() {
                segs[8 - (i - j)] = segs[j];
                segs[j] = 0;
            }
        }

        Some(V6 { segs, v4_tail })
    }

    fn read_v6_segment(&mut self) -> Option<Seg> {
        let colon = self.read_str(":");
        let first = match self.peek(0) {
            Some(x) => x,
            None => return colon.then_some(Seg::SingleColon),
        };

        if !first.is_ascii_hexdigit() {
            return colon.then(|| {
                if first == b':' {
                    self.skip(1);
                    Seg::Ellipsis
                } else {
                    Seg::SingleColon
                }
            });
        }

        let mut x = 0u16;
        let mut i = 0;
        while i < 4 {
            match self.peek(i) {
                Some(b) if b.is_ascii_hexdigit() => {
                    x = (x << 4) | hex_value(b);
                    i += 1;
                }
                Some(b'.') => return Some(Seg::MaybeV4(colon)),
                _ => break,
            }
        }
        if self.peek(i) == Some(b'.') {
            return Some(Seg::MaybeV4(colon));
        }
        self.skip(i);
        Some(Seg::Normal(x, colon))
    }

    fn read_v4(&mut self) -> Option<[u8; 4]> {
        let mut octets = [self.read_v4_octet()?, 0, 0, 0];
        for octet in &mut octets[1..] {
            if !self.read_str(".") {
                return None;
            }
            *octet = self.read_v4_octet()?;
        }
        Some(octets)
    }

    // One to three digits, leading zeros allowed.
    fn read_v4_octet(&mut self) -> Option<u8> {
        let mut res = 0u32;
        let mut i = 0;
        while i < 3 {
            match self.peek(i) {
                Some(x @ b'0'..=b'9') => res = res * 10 + u32::from(x - b'0'),
                _ => break,
            }
            i += 1;
        }
        if i == 0 {
            return None;
        }
        self.skip(i);
        u8::try_from(res).ok()
    }
}

fn hex_value(b: u8) -> u16 {
    match b {
        b'0'..=b'9' => u16::from(b - b'0'),
        b'a'..=b'f' => u16::from(b - b'a' + 10),
        _ => u16::from(b - b'A' + 10),
    }
}

fn parse_v4(s: &str) -> Option<[u8; 4]> {
    let mut reader = Reader::new(s.as_bytes());
    reader.read_v4().filter(|_| !reader.has_remaining())
}

fn parse_v6(s: &str) -> Option<V6> {
    let mut reader = Reader::new(s.as_bytes());
    reader.read_v6().filter(|_| !reader.has_remaining())
}

fn strip_brackets(host: &str) -> &str {
    host.strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host)
}

/// Splits an IPv6 host into the address and the zone identifier.
///
/// The host may be enclosed in brackets. The zone identifier may follow
/// either `"%25"` or a bare `"%"` not followed by two hexadecimal digits.
pub(crate) fn split_ipv6(host: &str) -> Option<(&str, Option<&str>)> {
    let inner = strip_brackets(host);
    let (addr, zone) = match inner.split_once('%') {
        None => (inner, None),
        Some((addr, rest)) => {
            let zone = match rest.strip_prefix("25") {
                Some(zone) if !zone.is_empty() => zone,
                _ => match rest.as_bytes() {
                    [hi, lo, ..] if is_hexdig_pair(*hi, *lo) => return None,
                    _ => rest,
                },
            };
            if zone.is_empty() || !ZONE_ID.validate(zone.as_bytes()) {
                return None;
            }
            (addr, Some(zone))
        }
    };
    parse_v6(addr).map(|_| (addr, zone))
}

/// Checks whether the string matches `IPvFuture`, with or without brackets.
pub(crate) fn is_ipv_future(host: &str) -> bool {
    let s = strip_brackets(host).as_bytes();
    let [b'v' | b'V', rem @ ..] = s else {
        return false;
    };
    let Some(dot) = rem.iter().position(|&x| x == b'.') else {
        return false;
    };
    let (version, addr) = (&rem[..dot], &rem[dot + 1..]);
    !version.is_empty() && HEXDIG.validate(version) && !addr.is_empty() && IPV_FUTURE.validate(addr)
}

/// Classifies a host subcomponent.
///
/// # Examples
///
/// ```
/// use uri_kit::ip::{classify, HostKind};
///
/// assert_eq!(classify("192.068.001.000"), HostKind::Ipv4);
/// assert_eq!(classify("[fe80::a%25en1]"), HostKind::Ipv6);
/// assert_eq!(classify("fe80::a%en1"), HostKind::Ipv6);
/// assert_eq!(classify("v1.x"), HostKind::IpvFuture);
/// assert_eq!(classify("10.10.10.10.example.com"), HostKind::RegName);
/// ```
#[must_use]
pub fn classify(host: &str) -> HostKind {
    if split_ipv6(host).is_some() {
        HostKind::Ipv6
    } else if is_ipv_future(host) {
        HostKind::IpvFuture
    } else if parse_v4(host).is_some() {
        HostKind::Ipv4
    } else {
        HostKind::RegName
    }
}

/// Returns the canonical form of an IPv4 address, without leading zeros.
///
/// Returns `None` if the string is not an IPv4 address.
#[must_use]
pub fn canonicalize_ipv4(s: &str) -> Option<String> {
    parse_v4(s).map(|[a, b, c, d]| format!("{a}.{b}.{c}.{d}"))
}

/// Returns the canonical form of an IPv6 host.
///
/// Hexadecimal digits are lowercased, leading zeros dropped, and the
/// longest run of two or more zero groups is compressed to `"::"`, the
/// leftmost run winning a tie. A trailing dotted-decimal part is kept
/// in dotted-decimal form. The zone identifier, if any, follows a bare
/// `"%"` in the output, and the brackets are dropped.
///
/// Returns `None` if the string is not an IPv6 host.
///
/// # Examples
///
/// ```
/// use uri_kit::ip::canonicalize_ipv6;
///
/// assert_eq!(canonicalize_ipv6("2001:0db8::0001").unwrap(), "2001:db8::1");
/// assert_eq!(canonicalize_ipv6("[FE80::A%25en1]").unwrap(), "fe80::a%en1");
/// ```
#[must_use]
pub fn canonicalize_ipv6(host: &str) -> Option<String> {
    let (addr, zone) = split_ipv6(host)?;
    let v6 = parse_v6(addr)?;

    let mut buf = String::with_capacity(addr.len());
    write_v6(&mut buf, &v6);
    if let Some(zone) = zone {
        buf.push('%');
        buf.push_str(zone);
    }
    Some(buf)
}

fn write_v6(buf: &mut String, v6: &V6) {
    #[derive(Copy, Clone, Default)]
    struct Span {
        start: usize,
        len: usize,
    }

    let hex_segs = if v6.v4_tail {
        &v6.segs[..6]
    } else {
        &v6.segs[..]
    };

    // Find the longest run of zeros.
    let zeros = {
        let mut longest = Span::default();
        let mut current = Span::default();

        for (i, &segment) in hex_segs.iter().enumerate() {
            if segment == 0 {
                if current.len == 0 {
                    current.start = i;
                }

                current.len += 1;

                if current.len > longest.len {
                    longest = current;
                }
            } else {
                current = Span::default();
            }
        }

        longest
    };

    fn write_subslice(buf: &mut String, chunk: &[u16]) {
        if let Some((first, tail)) = chunk.split_first() {
            let _ = write!(buf, "{first:x}");
            for segment in tail {
                let _ = write!(buf, ":{segment:x}");
            }
        }
    }

    let compressed = zeros.len > 1;
    if compressed {
        write_subslice(buf, &hex_segs[..zeros.start]);
        buf.push_str("::");
        write_subslice(buf, &hex_segs[zeros.start + zeros.len..]);
    } else {
        write_subslice(buf, hex_segs);
    }

    if v6.v4_tail {
        if !buf.is_empty() && !buf.ends_with(':') {
            buf.push(':');
        }
        let [a, b] = v6.segs[6].to_be_bytes();
        let [c, d] = v6.segs[7].to_be_bytes();
        let _ = write!(buf, "{a}.{b}.{c}.{d}");
    }
}
