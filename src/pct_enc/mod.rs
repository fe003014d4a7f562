//! Percent-encoding utilities.
//!
//! Unlike a strict validator, the functions in this module never fail:
//! a `%` that does not start a valid percent-encoded octet is treated as
//! a literal character, and decoded bytes that do not form valid UTF-8
//! are left in their encoded form.

pub mod table;

pub use table::Table;

use crate::{grammar::Grammar, Options};
use std::{borrow::Cow, iter::FusedIterator, str};

const fn gen_octet_table(hi: bool) -> [u8; 256] {
    let mut out = [0xff; 256];
    let shift = if hi { 4 } else { 0 };

    let mut i = 0;
    while i < 10 {
        out[(i + b'0') as usize] = i << shift;
        i += 1;
    }
    while i < 16 {
        out[(i - 10 + b'A') as usize] = i << shift;
        out[(i - 10 + b'a') as usize] = i << shift;
        i += 1;
    }
    out
}

const OCTET_TABLE_HI: &[u8; 256] = &gen_octet_table(true);
const OCTET_TABLE_LO: &[u8; 256] = &gen_octet_table(false);

pub(crate) const fn is_hexdig_pair(hi: u8, lo: u8) -> bool {
    hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit()
}

/// Decodes a percent-encoded octet, assuming that the bytes are hexadecimal.
fn decode_octet(hi: u8, lo: u8) -> u8 {
    debug_assert!(is_hexdig_pair(hi, lo));
    OCTET_TABLE_HI[hi as usize] | OCTET_TABLE_LO[lo as usize]
}

/// Checks whether a valid percent-encoded octet starts at index `i`.
fn is_octet_at(bytes: &[u8], i: usize) -> bool {
    bytes.get(i) == Some(&b'%')
        && i + 2 < bytes.len()
        && is_hexdig_pair(bytes[i + 1], bytes[i + 2])
}

/// Returns the index of the first `%` that does not start a valid
/// percent-encoded octet.
pub(crate) fn find_malformed_octet(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if !is_octet_at(bytes, i) {
                return Some(i);
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    None
}

/// Returns the percent-encoded form of a byte, with uppercase hexadecimal digits.
pub(crate) fn encode_byte(x: u8) -> &'static str {
    const TABLE: &[u8; 256 * 3] = &{
        const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

        let mut i = 0;
        let mut table = [0; 256 * 3];
        while i < 256 {
            table[i * 3] = b'%';
            table[i * 3 + 1] = HEX_DIGITS[i >> 4];
            table[i * 3 + 2] = HEX_DIGITS[i & 0b1111];
            i += 1;
        }
        table
    };

    const TABLE_STR: &str = match str::from_utf8(TABLE) {
        Ok(s) => s,
        Err(_) => unreachable!(),
    };

    &TABLE_STR[x as usize * 3..x as usize * 3 + 3]
}

fn push_encoded_char(buf: &mut String, ch: char) {
    for &x in ch.encode_utf8(&mut [0; 4]).as_bytes() {
        buf.push_str(encode_byte(x));
    }
}

/// Percent-encodes every UTF-8 byte of a character.
///
/// # Examples
///
/// ```
/// use uri_kit::pct_enc::encode_char;
///
/// assert_eq!(encode_char(' '), "%20");
/// assert_eq!(encode_char('é'), "%C3%A9");
/// ```
#[must_use]
pub fn encode_char(ch: char) -> String {
    let mut buf = String::with_capacity(12);
    push_encoded_char(&mut buf, ch);
    buf
}

pub(crate) enum DecodedUtf8Chunk<'a, 'b> {
    /// A subslice without any valid percent-encoded octet.
    Unencoded(&'a str),
    /// A run of octets decoded as UTF-8, followed by the source text
    /// of the octets that did not decode.
    Decoded { valid: &'b str, invalid: &'a str },
}

/// Walks the string, decoding each run of percent-encoded octets as UTF-8.
pub(crate) fn decode_utf8<'a>(s: &'a str, mut handle_chunk: impl FnMut(DecodedUtf8Chunk<'a, '_>)) {
    let bytes = s.as_bytes();
    let mut buf = Vec::new();
    let mut text_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if !is_octet_at(bytes, i) {
            i += 1;
            continue;
        }
        if text_start < i {
            handle_chunk(DecodedUtf8Chunk::Unencoded(&s[text_start..i]));
        }

        let run_start = i;
        buf.clear();
        while is_octet_at(bytes, i) {
            buf.push(decode_octet(bytes[i + 1], bytes[i + 2]));
            i += 3;
        }

        let mut decoded_len = 0;
        for chunk in buf.utf8_chunks() {
            let valid = chunk.valid();
            let invalid_len = chunk.invalid().len();
            let invalid_start = run_start + (decoded_len + valid.len()) * 3;
            handle_chunk(DecodedUtf8Chunk::Decoded {
                valid,
                invalid: &s[invalid_start..invalid_start + invalid_len * 3],
            });
            decoded_len += valid.len() + invalid_len;
        }
        text_start = i;
    }

    if text_start < bytes.len() {
        handle_chunk(DecodedUtf8Chunk::Unencoded(&s[text_start..]));
    }
}

/// Decodes every run of percent-encoded octets that forms valid UTF-8.
///
/// Octets that do not decode to valid UTF-8, as well as any `%` that
/// does not start a valid octet, are left as they are.
///
/// # Examples
///
/// ```
/// use uri_kit::pct_enc::decode_octets;
///
/// assert_eq!(decode_octets("caf%C3%A9"), "café");
/// assert_eq!(decode_octets("%FF%41"), "%FFA");
/// assert_eq!(decode_octets("100%"), "100%");
/// ```
#[must_use]
pub fn decode_octets(s: &str) -> Cow<'_, str> {
    if !s.contains('%') {
        return Cow::Borrowed(s);
    }

    let mut buf = String::with_capacity(s.len());
    decode_utf8(s, |chunk| match chunk {
        DecodedUtf8Chunk::Unencoded(text) => buf.push_str(text),
        DecodedUtf8Chunk::Decoded { valid, invalid } => {
            buf.push_str(valid);
            buf.push_str(invalid);
        }
    });
    Cow::Owned(buf)
}

/// Canonicalizes the percent-encoding of a component, appending the result to `buf`.
///
/// - Octets decoding to a character allowed by `decode` are decoded.
/// - Octets decoding to a non-ASCII character allowed by `table` are decoded.
/// - Other octets are kept with uppercase hexadecimal digits.
/// - Literal characters not allowed by `table` are percent-encoded,
///   including any `%` not starting a valid octet.
///
/// ASCII letters are lowercased if `to_ascii_lowercase` is set.
pub(crate) fn normalize_component(
    buf: &mut String,
    s: &str,
    table: Table,
    decode: Table,
    to_ascii_lowercase: bool,
) {
    let push = |buf: &mut String, ch: char| {
        if to_ascii_lowercase {
            buf.push(ch.to_ascii_lowercase());
        } else {
            buf.push(ch);
        }
    };

    decode_utf8(s, |chunk| match chunk {
        DecodedUtf8Chunk::Unencoded(text) => {
            for ch in text.chars() {
                if table.allows(ch) {
                    push(buf, ch);
                } else {
                    push_encoded_char(buf, ch);
                }
            }
        }
        DecodedUtf8Chunk::Decoded { valid, invalid } => {
            for ch in valid.chars() {
                if decode.allows(ch) || (!ch.is_ascii() && table.allows(ch)) {
                    push(buf, ch);
                } else {
                    push_encoded_char(buf, ch);
                }
            }
            for &x in invalid.as_bytes() {
                buf.push(x.to_ascii_uppercase() as char);
            }
        }
    });
}

/// An iterator used to percent-encode a string slice.
///
/// Characters allowed by the table are yielded as they are, and every
/// byte of the others as a percent-encoded octet.
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Encode<'s> {
    table: Table,
    source: &'s str,
    to_enc: &'s [u8],
}

impl<'s> Encode<'s> {
    /// Creates an iterator encoding `source` with the given table.
    pub fn new(table: Table, source: &'s str) -> Self {
        Self {
            table,
            source,
            to_enc: &[],
        }
    }
}

/// An item returned by the [`Encode`] iterator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncodedChunk<'a> {
    /// An unencoded subslice.
    Unencoded(&'a str),
    /// A byte, percent-encoded (for example, `0x20` encoded as `"%20"`).
    PctEncoded(&'static str),
}

impl<'a> EncodedChunk<'a> {
    /// Returns the chunk as a string slice.
    #[must_use]
    pub fn as_str(self) -> &'a str {
        match self {
            Self::Unencoded(s) | Self::PctEncoded(s) => s,
        }
    }
}

impl<'a> Iterator for Encode<'a> {
    type Item = EncodedChunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let [x, rem @ ..] = self.to_enc {
            self.to_enc = rem;
            return Some(EncodedChunk::PctEncoded(encode_byte(*x)));
        }

        if self.source.is_empty() {
            return None;
        }

        let mut iter = self.source.char_indices();

        let first_unallowed_i = iter
            .find_map(|(i, ch)| (!self.table.allows(ch)).then_some(i))
            .unwrap_or(self.source.len());

        let next_allowed_i = iter
            .find_map(|(i, ch)| self.table.allows(ch).then_some(i))
            .unwrap_or(self.source.len());

        if first_unallowed_i == 0 {
            let (unallowed, rem) = self.source.split_at(next_allowed_i);
            self.source = rem;

            let (&x, rem) = unallowed.as_bytes().split_first()?;
            self.to_enc = rem;

            Some(EncodedChunk::PctEncoded(encode_byte(x)))
        } else {
            let allowed = &self.source[..first_unallowed_i];
            self.to_enc = &self.source.as_bytes()[first_unallowed_i..next_allowed_i];
            self.source = &self.source[next_allowed_i..];

            Some(EncodedChunk::Unencoded(allowed))
        }
    }
}

impl FusedIterator for Encode<'_> {}

/// Percent-encodes every character of `s` not allowed by `table`.
///
/// A literal `%` is always encoded.
#[must_use]
pub fn escape_with(s: &str, table: Table) -> String {
    let mut buf = String::with_capacity(s.len());
    for chunk in Encode::new(table, s) {
        buf.push_str(chunk.as_str());
    }
    buf
}

/// Percent-encodes a string for use as a single component value.
///
/// Every character that is neither unreserved nor a sub-delimiter is
/// encoded. Non-ASCII characters are kept literally when [`Options::iri`]
/// is set.
///
/// # Examples
///
/// ```
/// use uri_kit::{escape_component, Options};
///
/// assert_eq!(escape_component("a b/c", &Options::new()), "a%20b%2Fc");
/// assert_eq!(escape_component("$&+,;=", &Options::new()), "$&+,;=");
/// assert_eq!(escape_component("é", &Options::new().iri(true)), "é");
/// ```
#[must_use]
pub fn escape_component(s: &str, options: &Options) -> String {
    escape_with(s, Grammar::get(options.is_iri()).escape)
}

/// Decodes every valid percent-encoded octet in a string.
///
/// See [`decode_octets`] for the handling of malformed input.
#[must_use]
pub fn unescape_component(s: &str) -> String {
    decode_octets(s).into_owned()
}
