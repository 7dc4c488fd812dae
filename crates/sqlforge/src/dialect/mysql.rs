//! MySQL dialect.

use super::{Dialect, Feature, UpsertStyle, push_hex};

/// MySQL: backtick identifiers, `?` placeholders, backslash string escapes,
/// `ON DUPLICATE KEY UPDATE` upserts. No RETURNING clause.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mysql;

impl Dialect for Mysql {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn quote_char(&self) -> char {
        '`'
    }

    fn encode_string(&self, value: &str, out: &mut String) {
        out.push('\'');
        for ch in value.chars() {
            match ch {
                '\0' => out.push_str("\\0"),
                '\'' => out.push_str("\\'"),
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\x1a' => out.push_str("\\Z"),
                _ => out.push(ch),
            }
        }
        out.push('\'');
    }

    fn encode_bool(&self, value: bool) -> &'static str {
        if value { "1" } else { "0" }
    }

    fn encode_bytes(&self, value: &[u8], out: &mut String) {
        if value.is_empty() {
            out.push_str("''");
            return;
        }
        out.push_str("0x");
        push_hex(value, out);
    }

    fn write_placeholder(&self, _index: usize, out: &mut String) {
        out.push('?');
    }

    fn supports(&self, feature: Feature) -> bool {
        matches!(feature, Feature::Upsert | Feature::Transactions)
    }

    fn upsert_style(&self) -> Option<UpsertStyle> {
        Some(UpsertStyle::OnDuplicateKey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_quotes_and_backslashes() {
        let mut out = String::new();
        Mysql.encode_string("O'Brien \\ \"q\"", &mut out);
        assert_eq!(out, r#"'O\'Brien \\ \"q\"'"#);
    }

    #[test]
    fn escapes_control_characters() {
        let mut out = String::new();
        Mysql.encode_string("a\0b\nc\rd\x1a", &mut out);
        assert_eq!(out, "'a\\0b\\nc\\rd\\Z'");
    }

    #[test]
    fn bytes_render_as_hex_literal() {
        let mut out = String::new();
        Mysql.encode_bytes(&[0xde, 0xad, 0xbe, 0xef], &mut out);
        assert_eq!(out, "0xdeadbeef");
    }

    #[test]
    fn empty_bytes_render_as_empty_string() {
        let mut out = String::new();
        Mysql.encode_bytes(&[], &mut out);
        assert_eq!(out, "''");
    }
}
