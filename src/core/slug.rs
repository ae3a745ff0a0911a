//! Slug canonicalization.
//!
//! A slug may reach the site typed by hand, copied from a generated link or
//! carried by a legacy hash link, so the same project can show up as
//! `Baño-Terrazo`, `bano-terrazo` or `ba%C3%B1o-terrazo`. Every lookup
//! compares [`normalize`]d forms.

use std::borrow::Cow;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use unicode_normalization::UnicodeNormalization;

/// Characters escaped when a slug is placed in a path segment.
///
/// Matches `encodeURIComponent`: everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
pub const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Canonicalize a content identifier.
///
/// Percent-decodes (keeping the raw text when the escapes don't form valid
/// UTF-8), lower-cases, decomposes (NFD) and drops combining diacritical
/// marks. Idempotent: `normalize(&normalize(s)) == normalize(s)`.
///
/// Dropping a mark can join a new escape (`%2\u{301}541` → `%2541`), so the
/// whole fold repeats until it reaches a fixed point.
pub fn normalize(raw: &str) -> String {
    let mut current = fold(raw);
    loop {
        let next = fold(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn fold(raw: &str) -> String {
    decode_fully(raw)
        .to_lowercase()
        .nfd()
        .filter(|c| !is_diacritic(*c))
        .collect()
}

/// Percent-decode once, falling back to the input on malformed escapes.
pub fn decode_or_raw(raw: &str) -> Cow<'_, str> {
    match percent_decode_str(raw).decode_utf8() {
        Ok(decoded) => decoded,
        Err(_) => Cow::Borrowed(raw),
    }
}

/// Decode until the text stops changing.
fn decode_fully(raw: &str) -> Cow<'_, str> {
    let mut current = Cow::Borrowed(raw);
    loop {
        let next = decode_or_raw(&current);
        if next == current {
            return current;
        }
        let next = next.into_owned();
        current = Cow::Owned(next);
    }
}

/// Combining Diacritical Marks block (U+0300..=U+036F).
#[inline]
fn is_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

/// Percent-encode a string for use as one path segment.
pub fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, COMPONENT).to_string()
}

/// Canonical URL form of a slug: decoded once, then encoded.
///
/// Stored slugs may already be escaped; this keeps them from being escaped
/// twice (`ba%C3%B1o` and `baño` both become `ba%C3%B1o`).
pub fn canonical_segment(raw: &str) -> String {
    encode_component(&decode_or_raw(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accent_and_case_insensitive() {
        assert_eq!(normalize("Café-Sol"), normalize("cafe-sol"));
        assert_eq!(normalize("Café-Sol"), "cafe-sol");
        assert_eq!(normalize("BAÑO-Terrazo"), "bano-terrazo");
    }

    #[test]
    fn test_percent_encoded_matches_plain() {
        assert_eq!(normalize("ba%C3%B1o-gris"), "bano-gris");
        assert_eq!(normalize("ba%c3%b1o-gris"), normalize("baño-gris"));
        // Decomposed input (n + U+0303) folds the same way as precomposed
        assert_eq!(normalize("ban\u{0303}o"), "bano");
    }

    #[test]
    fn test_malformed_escape_falls_back_to_raw() {
        // %FF alone is not valid UTF-8
        assert_eq!(normalize("Cocina%FF"), "cocina%ff");
        // Lone percent sign and broken hex are left alone
        assert_eq!(normalize("100%"), "100%");
        assert_eq!(normalize("a%zzb"), "a%zzb");
    }

    #[test]
    fn test_nested_escapes_unwrap() {
        assert_eq!(normalize("%2541"), "a");
        assert_eq!(normalize("ba%25C3%25B1o"), "bano");
        // Nesting depth is not capped
        assert_eq!(normalize("%252525252525252541"), "a");
    }

    #[test]
    fn test_stripped_mark_exposes_escape() {
        assert_eq!(normalize("%2\u{0301}541"), "a");
        assert_eq!(normalize("%C\u{0300}3%B1o"), "no");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "",
            "Café-Sol",
            "ba%C3%B1o-terrazo-gris",
            "%2541",
            "%FF%41",
            "Cocina%FF",
            "İstanbul",
            "ÅNGSTRÖM",
            "cocina blanca / norte",
            "a%zzb%",
            "ñandú",
            "e\u{0301}\u{0301}",
            "%2\u{0301}541",
            "%252525252525252541",
            "%2\u{0301}5\u{0301}2541",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn test_only_diacritic_block_is_stripped() {
        // Non-Latin letters survive (they are not combining marks)
        assert_eq!(normalize("日本"), "日本");
        assert_eq!(normalize("ß"), "ß");
    }

    #[test]
    fn test_encode_component() {
        assert_eq!(encode_component("baño gris"), "ba%C3%B1o%20gris");
        assert_eq!(encode_component("a-b_c.d~e"), "a-b_c.d~e");
        assert_eq!(encode_component("a/b#c?d"), "a%2Fb%23c%3Fd");
    }

    #[test]
    fn test_canonical_segment_does_not_double_encode() {
        assert_eq!(canonical_segment("baño"), "ba%C3%B1o");
        assert_eq!(canonical_segment("ba%C3%B1o"), "ba%C3%B1o");
        // Malformed escapes are encoded as-is
        assert_eq!(canonical_segment("x%FF"), "x%25FF");
    }
}
