use uri_kit::{
    escape_component,
    pct_enc::{decode_octets, encode_char, escape_with, table, EncodedChunk, Encode},
    unescape_component, Options,
};

const RAW: &str = "te😃a 测1`~!@试#$%st^&+=";
const ESCAPED: &str = "te%F0%9F%98%83a%20%E6%B5%8B1%60~!%40%E8%AF%95%23$%25st%5E&+=";

#[test]
fn escape() {
    assert_eq!(escape_component(RAW, &Options::new()), ESCAPED);
    assert_eq!(escape_component("", &Options::new()), "");
    assert_eq!(escape_component("%", &Options::new()), "%25");
    assert_eq!(escape_component("a/b?c#d", &Options::new()), "a%2Fb%3Fc%23d");
    assert_eq!(escape_component("\u{e9}", &Options::new()), "%C3%A9");
    assert_eq!(escape_component("\u{e9}", &Options::new().iri(true)), "\u{e9}");
    assert_eq!(
        escape_component("\u{e001}", &Options::new().iri(true)),
        "%EE%80%81"
    );
}

#[test]
fn unescape() {
    assert_eq!(unescape_component(ESCAPED), RAW);
    assert_eq!(unescape_component("%7E"), "~");
    assert_eq!(unescape_component("%7e%2F"), "~/");
    assert_eq!(unescape_component("%e2%80%ae"), "\u{202e}");
    assert_eq!(unescape_component("%"), "%");
    assert_eq!(unescape_component("100%zz"), "100%zz");
    assert_eq!(unescape_component("%FF%C3%A9"), "%FF\u{e9}");
    assert_eq!(unescape_component("%C3"), "%C3");
}

#[test]
fn encode_iter() {
    let chunks: Vec<_> = Encode::new(table::UNRESERVED, "a b").collect();
    assert_eq!(
        chunks,
        [
            EncodedChunk::Unencoded("a"),
            EncodedChunk::PctEncoded("%20"),
            EncodedChunk::Unencoded("b"),
        ]
    );

    let chunks: Vec<_> = Encode::new(table::UNRESERVED, "\u{e9}").map(EncodedChunk::as_str).collect();
    assert_eq!(chunks, ["%C3", "%A9"]);

    assert_eq!(escape_with("a/b", table::PATH), "a/b");
    assert_eq!(escape_with("a%2Fb", table::PATH), "a%252Fb");
}

#[test]
fn encode_and_decode() {
    assert_eq!(encode_char('\u{1f603}'), "%F0%9F%98%83");
    assert_eq!(encode_char('%'), "%25");
    assert_eq!(decode_octets("no-octets"), "no-octets");
    assert_eq!(decode_octets("caf%C3%A9%20au%20lait"), "caf\u{e9} au lait");
}
