//! Sanitizing rules for Turtle local names and literals
//!
//! Every URI minted from input text goes through [`mint_local_name`]
//! (which builds on [`sanitize_local_name`]), and every literal value goes
//! through [`escape_literal`] when it is rendered. Both are pure and
//! infallible.

use unicode_normalization::UnicodeNormalization;

/// Replace every character outside `[A-Za-z0-9_-]` with `_`
///
/// The result has exactly as many characters as the input.
///
/// # Examples
///
/// ```
/// use phenokg_domain::sanitize_local_name;
///
/// assert_eq!(sanitize_local_name("Crohn's disease"), "Crohn_s_disease");
/// assert_eq!(sanitize_local_name("A-1_b"), "A-1_b");
/// ```
pub fn sanitize_local_name(text: &str) -> String {
    text.chars()
        .map(|c| if is_local_name_char(c) { c } else { '_' })
        .collect()
}

/// Sanitize text into a token usable as the local part of a prefixed name
///
/// Applies [`sanitize_local_name`], then prefixes `_` when the token would
/// start with `-`, which Turtle does not allow as the first character of a
/// local name.
pub fn mint_local_name(text: &str) -> String {
    let token = sanitize_local_name(text);
    if token.starts_with('-') {
        format!("_{}", token)
    } else {
        token
    }
}

/// Escape text for embedding inside a double-quoted Turtle literal
///
/// The text is first normalized to Unicode NFC. Backslash, double quote,
/// newline, carriage return and tab are escaped; any other control
/// character is dropped.
///
/// # Examples
///
/// ```
/// use phenokg_domain::escape_literal;
///
/// assert_eq!(escape_literal("say \"hi\"\n"), "say \\\"hi\\\"\\n");
/// ```
pub fn escape_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.nfc() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

fn is_local_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_replaces_illegal_characters() {
        assert_eq!(sanitize_local_name("a/b\\c d:e"), "a_b_c_d_e");
        assert_eq!(sanitize_local_name("Type 2 (T2DM)"), "Type_2__T2DM_");
    }

    #[test]
    fn test_sanitize_keeps_legal_characters() {
        assert_eq!(sanitize_local_name("abc-DEF_123"), "abc-DEF_123");
    }

    #[test]
    fn test_sanitize_multibyte_keeps_char_count() {
        let input = "Sjögren’s";
        let output = sanitize_local_name(input);
        assert_eq!(output, "Sj_gren_s");
        assert_eq!(output.chars().count(), input.chars().count());
    }

    #[test]
    fn test_sanitize_empty() {
        assert_eq!(sanitize_local_name(""), "");
    }

    #[test]
    fn test_mint_guards_leading_hyphen() {
        assert_eq!(mint_local_name("-12"), "_-12");
        assert_eq!(mint_local_name("12-"), "12-");
    }

    #[test]
    fn test_escape_quotes_and_whitespace_controls() {
        assert_eq!(escape_literal("a\"b"), "a\\\"b");
        assert_eq!(escape_literal("line1\nline2"), "line1\\nline2");
        assert_eq!(escape_literal("a\r\tb"), "a\\r\\tb");
    }

    #[test]
    fn test_escape_backslash() {
        assert_eq!(escape_literal("C:\\path"), "C:\\\\path");
    }

    #[test]
    fn test_escape_drops_other_controls() {
        assert_eq!(escape_literal("a\u{0007}b\u{001b}c"), "abc");
    }

    #[test]
    fn test_escape_normalizes_to_composed_form() {
        // "e" followed by a combining acute accent
        let decomposed = "Me\u{0301}nie\u{0300}re";
        assert_eq!(escape_literal(decomposed), "Ménière");
    }
}
