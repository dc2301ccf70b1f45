//! RFC 3986 percent-encoding shared by URL, body, signature base and header
//! construction, plus the lenient form decoding used for token responses.

use std::collections::HashMap;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything except the RFC 3986 unreserved set `A-Z a-z 0-9 - . _ ~`.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encodes every byte outside the unreserved set with uppercase hex.
///
/// Multi-byte UTF-8 sequences are encoded byte by byte, so `"少"` becomes
/// `"%E5%B0%91"`.
pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, OAUTH_ENCODE_SET).to_string()
}

/// Inverse of [`percent_encode`]. `+` is kept literally.
pub fn percent_decode(input: &str) -> String {
    percent_decode_str(input).decode_utf8_lossy().into_owned()
}

/// Form-urlencoded decoding: `+` is a space, then `%XX` escapes are resolved.
pub fn url_decode(input: &str) -> String {
    percent_decode(&input.replace('+', " "))
}

/// Encodes `pairs` as `key=value&key=value`, keeping the given order.
pub fn encode_pairs<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Decodes a `key=value&key=value` body.
///
/// Each item is split on its first `=`. A key without `=` maps to `None`.
/// Empty items (`a=1&&b=2`) are skipped. When a key repeats, the last value
/// wins.
pub fn decode_query_string(input: &str) -> HashMap<String, Option<String>> {
    input
        .split('&')
        .filter(|item| !item.is_empty())
        .map(|item| {
            let mut kv = item.splitn(2, '=');
            let key = url_decode(kv.next().unwrap_or_default());
            let value = kv.next().map(url_decode);
            (key, value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreserved_characters_are_literal() {
        let unreserved = "ABCXYZabcxyz0189-._~";
        assert_eq!(percent_encode(unreserved), unreserved);
    }

    #[test]
    fn reserved_characters_use_uppercase_hex() {
        assert_eq!(percent_encode(" "), "%20");
        assert_eq!(percent_encode("+"), "%2B");
        assert_eq!(percent_encode("*"), "%2A");
        assert_eq!(percent_encode("!'()"), "%21%27%28%29");
        assert_eq!(
            percent_encode("https://api.twitter.com/1.1/"),
            "https%3A%2F%2Fapi.twitter.com%2F1.1%2F"
        );
        assert_eq!(
            percent_encode("Hello Ladies + Gentlemen, a signed OAuth request!"),
            "Hello%20Ladies%20%2B%20Gentlemen%2C%20a%20signed%20OAuth%20request%21"
        );
    }

    #[test]
    fn multibyte_sequences_encode_each_byte() {
        assert_eq!(percent_encode("少女"), "%E5%B0%91%E5%A5%B3");
        assert_eq!(percent_encode("☃"), "%E2%98%83");
    }

    #[test]
    fn decode_reverses_encode() {
        for sample in &[
            "",
            "plain",
            "a b+c&d=e",
            "終末旅行",
            "emoji 🎉 and ~tilde~",
            "%already%20encoded",
        ] {
            assert_eq!(percent_decode(&percent_encode(sample)), *sample);
        }
    }

    #[test]
    fn url_decode_treats_plus_as_space() {
        assert_eq!(url_decode("hello+world"), "hello world");
        assert_eq!(url_decode("a%2Bb"), "a+b");
        assert_eq!(percent_decode("hello+world"), "hello+world");
    }

    #[test]
    fn encode_pairs_keeps_insertion_order() {
        let encoded = encode_pairs(vec![("status", "hello world"), ("count", "5"), ("a", "&")]);
        assert_eq!(encoded, "status=hello%20world&count=5&a=%26");
        assert_eq!(encode_pairs(Vec::new()), "");
    }

    #[test]
    fn decode_query_string_typical() {
        let decoded = decode_query_string("a=1&b=2");
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded["a"].as_deref(), Some("1"));
        assert_eq!(decoded["b"].as_deref(), Some("2"));
    }

    #[test]
    fn decode_query_string_missing_value() {
        let decoded = decode_query_string("a=1&b");
        assert_eq!(decoded["a"].as_deref(), Some("1"));
        assert_eq!(decoded["b"], None);
    }

    #[test]
    fn decode_query_string_edge() {
        let decoded = decode_query_string("k==&empty=&&x=a+b%21");
        assert_eq!(decoded.len(), 3);
        assert_eq!(decoded["k"].as_deref(), Some("="));
        assert_eq!(decoded["empty"].as_deref(), Some(""));
        assert_eq!(decoded["x"].as_deref(), Some("a b!"));
    }
}
