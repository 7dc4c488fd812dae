//! PostgreSQL dialect.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use super::{Dialect, Feature, UpsertStyle, push_hex};

/// PostgreSQL: ANSI double-quoted identifiers, `$n` placeholders, quote
/// doubling for strings (standard conforming strings), `ON CONFLICT`
/// upserts, RETURNING support.
#[derive(Debug, Clone, Copy, Default)]
pub struct Postgres;

impl Dialect for Postgres {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn quote_char(&self) -> char {
        '"'
    }

    fn encode_string(&self, value: &str, out: &mut String) {
        out.push('\'');
        for ch in value.chars() {
            if ch == '\'' {
                out.push('\'');
            }
            out.push(ch);
        }
        out.push('\'');
    }

    fn encode_bool(&self, value: bool) -> &'static str {
        if value { "TRUE" } else { "FALSE" }
    }

    fn encode_bytes(&self, value: &[u8], out: &mut String) {
        out.push_str("'\\x");
        push_hex(value, out);
        out.push('\'');
    }

    fn encode_datetime(&self, value: &DateTime<Utc>, out: &mut String) {
        let _ = write!(out, "'{}'", value.format("%Y-%m-%d %H:%M:%S%.6f%:z"));
    }

    fn write_placeholder(&self, index: usize, out: &mut String) {
        let _ = write!(out, "${index}");
    }

    fn supports(&self, _feature: Feature) -> bool {
        true
    }

    fn upsert_style(&self) -> Option<UpsertStyle> {
        Some(UpsertStyle::OnConflict)
    }
}
