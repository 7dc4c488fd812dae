//! ClickHouse dialect.

use super::{Dialect, Feature, push_hex};

/// ClickHouse: backtick identifiers, `?` placeholders, backslash string
/// escapes. No transactions, no upsert, no RETURNING. Source-less SELECTs
/// are allowed (`SELECT version()` and friends).
#[derive(Debug, Clone, Copy, Default)]
pub struct ClickHouse;

impl Dialect for ClickHouse {
    fn name(&self) -> &'static str {
        "clickhouse"
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
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                _ => out.push(ch),
            }
        }
        out.push('\'');
    }

    fn encode_bool(&self, value: bool) -> &'static str {
        if value { "1" } else { "0" }
    }

    fn encode_bytes(&self, value: &[u8], out: &mut String) {
        out.push_str("unhex('");
        push_hex(value, out);
        out.push_str("')");
    }

    fn write_placeholder(&self, _index: usize, out: &mut String) {
        out.push('?');
    }

    fn supports(&self, _feature: Feature) -> bool {
        false
    }

    fn allows_empty_from(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backslash_escapes_strings() {
        let mut out = String::new();
        ClickHouse.encode_string("a'b\\c\nd", &mut out);
        assert_eq!(out, "'a\\'b\\\\c\\nd'");
    }

    #[test]
    fn bytes_render_through_unhex() {
        let mut out = String::new();
        ClickHouse.encode_bytes(&[0x00, 0x10], &mut out);
        assert_eq!(out, "unhex('0010')");
    }

    #[test]
    fn has_no_optional_capabilities() {
        assert!(!ClickHouse.supports(Feature::Upsert));
        assert!(!ClickHouse.supports(Feature::Returning));
        assert!(!ClickHouse.supports(Feature::Transactions));
        assert!(ClickHouse.allows_empty_from());
    }
}
