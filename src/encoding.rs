//! Character encoding detection and transcoding.
//!
//! Byte input is decoded with, in order: a byte-order mark, the HTTP
//! `Content-Type` charset (loader only), the first `<meta>` charset
//! declaration, UTF-8. [`transcode_to_utf8`] replaces malformed sequences;
//! [`decode_strict`] refuses them so the loader can report the failure.

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_8};

use crate::error::{Error, Result};
use crate::patterns::META_CHARSET;

/// Bytes scanned for a `<meta>` charset declaration.
const META_SCAN_BYTES: usize = 1024;

/// Encoding declared by the first `<meta>` charset in the document head,
/// or UTF-8.
///
/// Unknown labels are skipped in favour of a later declaration.
///
/// # Examples
///
/// ```
/// use rs_readability::encoding::detect_encoding;
///
/// let html = br#"<meta http-equiv="Content-Type" content="text/html; charset=windows-1252">"#;
/// assert_eq!(detect_encoding(html).name(), "windows-1252");
/// ```
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    let head = String::from_utf8_lossy(&html[..html.len().min(META_SCAN_BYTES)]);
    META_CHARSET
        .captures_iter(&head)
        .filter_map(|caps| caps.get(1))
        .find_map(|label| Encoding::for_label(label.as_str().as_bytes()))
        .unwrap_or(UTF_8)
}

/// Encoding named by the `charset` parameter of a `Content-Type` header.
#[must_use]
pub fn encoding_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    content_type
        .split(';')
        .skip(1)
        .filter_map(|param| param.split_once('='))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("charset"))
        .and_then(|(_, value)| Encoding::for_label(value.trim().trim_matches('"').as_bytes()))
}

/// Decode page bytes to UTF-8, replacing malformed sequences with U+FFFD.
#[must_use]
pub fn transcode_to_utf8(html: &[u8]) -> String {
    let (decoded, encoding, had_errors) = detect_encoding(html).decode(html);
    if had_errors {
        tracing::debug!(encoding = encoding.name(), "replaced malformed input bytes");
    }
    decoded.into_owned()
}

/// Decode a response body without replacement characters.
///
/// # Errors
/// * `DecodingFailed` when the bytes are malformed for the chosen encoding
pub fn decode_strict(body: &[u8], content_type: Option<&str>) -> Result<String> {
    let (encoding, body) = match Encoding::for_bom(body) {
        Some((encoding, bom_length)) => (encoding, &body[bom_length..]),
        None => {
            let encoding = content_type
                .and_then(encoding_from_content_type)
                .unwrap_or_else(|| detect_encoding(body));
            (encoding, body)
        }
    };

    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .map(Cow::into_owned)
        .ok_or(Error::DecodingFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_charset_forms() {
        assert_eq!(detect_encoding(br#"<meta charset="utf-8">"#), UTF_8);
        assert_eq!(detect_encoding(b"<META CHARSET=windows-1252>").name(), "windows-1252");
        // ISO-8859-1 is an alias of windows-1252 in the WHATWG encoding list
        assert_eq!(
            detect_encoding(br#"<meta http-equiv="Content-Type" content="text/html; charset=ISO-8859-1">"#).name(),
            "windows-1252"
        );
        assert_eq!(detect_encoding(br#"<meta charset='shift_jis'>"#).name(), "Shift_JIS");
    }

    #[test]
    fn unknown_label_falls_through() {
        let html = br#"<meta charset="no-such-charset"><meta charset="koi8-r">"#;
        assert_eq!(detect_encoding(html).name(), "KOI8-R");
        assert_eq!(detect_encoding(b"<p>no declaration</p>"), UTF_8);
    }

    #[test]
    fn declaration_past_scan_window_is_ignored() {
        let mut html = vec![b' '; META_SCAN_BYTES];
        html.extend_from_slice(br#"<meta charset="windows-1252">"#);
        assert_eq!(detect_encoding(&html), UTF_8);
    }

    #[test]
    fn transcode_uses_declared_encoding() {
        let html = b"<meta charset=\"windows-1252\"><p>\x93Caf\xE9\x94</p>";
        assert!(transcode_to_utf8(html).contains("\u{201C}Café\u{201D}"));
    }

    #[test]
    fn transcode_replaces_malformed_utf8() {
        let result = transcode_to_utf8(b"<p>ok \xFF\xFE still ok</p>");
        assert!(result.contains("ok \u{FFFD}\u{FFFD} still ok"));
    }

    #[test]
    fn content_type_charset_wins_over_meta() {
        let body = b"<html><head><meta charset=\"utf-8\"></head><body>Caf\xE9</body></html>";
        let decoded = decode_strict(body, Some("text/html; charset=ISO-8859-1")).expect("decodes");
        assert!(decoded.contains("Café"));
    }

    #[test]
    fn strict_decode_rejects_malformed_utf8() {
        let body = b"<html><body>Test \xFF\xFE Invalid</body></html>";
        assert!(matches!(decode_strict(body, Some("text/html")), Err(Error::DecodingFailed)));
    }

    #[test]
    fn strict_decode_honours_bom() {
        let body = b"\xEF\xBB\xBF<p>hello</p>";
        assert_eq!(decode_strict(body, None).expect("decodes"), "<p>hello</p>");
    }

    #[test]
    fn encoding_from_content_type_variants() {
        assert_eq!(encoding_from_content_type("text/html; charset=\"UTF-8\""), Some(UTF_8));
        assert_eq!(encoding_from_content_type("text/html"), None);
        assert_eq!(encoding_from_content_type("text/html; Charset=bogus"), None);
    }
}
