//! Per-backend lexical rules and capability flags.
//!
//! A [`Dialect`] bundles everything that differs between SQL backends at the
//! text level: identifier quoting, literal escape tables, boolean spelling,
//! placeholder syntax, and feature flags. Dialects are stateless unit values
//! shared read-only across statements and threads.
//!
//! By default a dialect interpolates values inline as escaped literals. Wrap
//! it in [`Prepared`] to emit native placeholders and collect an ordered
//! parameter list instead.

use std::fmt;
use std::fmt::Write;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::error::{RenderError, RenderResult};

mod clickhouse;
mod mysql;
mod postgres;
mod sqlite;

pub use clickhouse::ClickHouse;
pub use mysql::Mysql;
pub use postgres::Postgres;
pub use sqlite::Sqlite;

/// A backend capability that statements may require at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    /// Conflict-resolving INSERT (`ON CONFLICT` / `ON DUPLICATE KEY`)
    Upsert,
    /// `RETURNING` clause on INSERT/UPDATE/DELETE
    Returning,
    /// Transactions (consumed by the execution layer, not by rendering)
    Transactions,
}

impl Feature {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::Upsert => "upsert",
            Feature::Returning => "RETURNING",
            Feature::Transactions => "transactions",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The syntactic family a dialect uses for upserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertStyle {
    /// `ON CONFLICT (target) DO ...`; proposed values spell `excluded.col`
    OnConflict,
    /// `ON DUPLICATE KEY UPDATE ...`; proposed values spell `VALUES(col)`
    OnDuplicateKey,
}

/// Backend-specific lexical rules.
///
/// The trait is object safe: statement nodes hold `&dyn Dialect` during a
/// render pass, and caller-supplied [`Render`](crate::Render) implementors
/// receive the same reference.
pub trait Dialect: fmt::Debug + Send + Sync {
    /// Short lowercase backend name, used in error messages and logs.
    fn name(&self) -> &'static str;

    /// The identifier quote character.
    fn quote_char(&self) -> char;

    /// Quote an identifier into `out`.
    ///
    /// Dotted paths are split and each segment quoted separately, so
    /// `db.users` becomes `` `db`.`users` ``. A `*` segment passes through
    /// unquoted. Embedded quote characters are doubled; a NUL byte is
    /// rejected as an escape error.
    fn quote_ident(&self, ident: &str, out: &mut String) -> RenderResult<()> {
        for (i, part) in ident.split('.').enumerate() {
            if i > 0 {
                out.push('.');
            }
            if part == "*" {
                out.push('*');
                continue;
            }
            quote_segment(self.quote_char(), part, out)?;
        }
        Ok(())
    }

    /// Append a string value as a quoted, escaped literal.
    fn encode_string(&self, value: &str, out: &mut String);

    /// The literal spelling of a boolean.
    fn encode_bool(&self, value: bool) -> &'static str;

    /// Append binary data as a literal.
    fn encode_bytes(&self, value: &[u8], out: &mut String);

    /// Append a UTC timestamp as a quoted literal.
    fn encode_datetime(&self, value: &DateTime<Utc>, out: &mut String) {
        let _ = write!(out, "'{}'", value.format("%Y-%m-%d %H:%M:%S%.6f"));
    }

    /// Append a date as a quoted literal.
    fn encode_date(&self, value: &NaiveDate, out: &mut String) {
        let _ = write!(out, "'{}'", value.format("%Y-%m-%d"));
    }

    /// Append a time of day as a quoted literal.
    fn encode_time(&self, value: &NaiveTime, out: &mut String) {
        let _ = write!(out, "'{}'", value.format("%H:%M:%S%.6f"));
    }

    /// Append the native placeholder for the 1-based parameter `index`.
    fn write_placeholder(&self, index: usize, out: &mut String);

    /// Whether values are inlined as literals (`true`) or emitted as
    /// placeholders with an out-of-band parameter list (`false`).
    fn interpolates(&self) -> bool {
        true
    }

    /// Whether the backend supports `feature`.
    fn supports(&self, feature: Feature) -> bool;

    /// The upsert syntax family, if the backend has one.
    ///
    /// Must agree with `supports(Feature::Upsert)`.
    fn upsert_style(&self) -> Option<UpsertStyle> {
        None
    }

    /// Whether a SELECT without a FROM source is acceptable.
    fn allows_empty_from(&self) -> bool {
        false
    }
}

fn quote_segment(quote: char, segment: &str, out: &mut String) -> RenderResult<()> {
    if segment.contains('\0') {
        return Err(RenderError::Escape(
            "identifier contains a NUL byte".to_string(),
        ));
    }
    out.push(quote);
    for ch in segment.chars() {
        if ch == quote {
            out.push(quote);
        }
        out.push(ch);
    }
    out.push(quote);
    Ok(())
}

/// Wrapper that switches a dialect from inline interpolation to native
/// placeholders.
///
/// All lexical rules are delegated to the inner dialect; only
/// [`Dialect::interpolates`] is overridden. `Prepared(Postgres)` renders
/// `$1, $2, ...` and fills the buffer's parameter list, while `Postgres`
/// alone renders inline literals.
#[derive(Debug, Clone, Copy, Default)]
pub struct Prepared<D>(pub D);

impl<D: Dialect> Dialect for Prepared<D> {
    fn name(&self) -> &'static str {
        self.0.name()
    }

    fn quote_char(&self) -> char {
        self.0.quote_char()
    }

    fn quote_ident(&self, ident: &str, out: &mut String) -> RenderResult<()> {
        self.0.quote_ident(ident, out)
    }

    fn encode_string(&self, value: &str, out: &mut String) {
        self.0.encode_string(value, out);
    }

    fn encode_bool(&self, value: bool) -> &'static str {
        self.0.encode_bool(value)
    }

    fn encode_bytes(&self, value: &[u8], out: &mut String) {
        self.0.encode_bytes(value, out);
    }

    fn encode_datetime(&self, value: &DateTime<Utc>, out: &mut String) {
        self.0.encode_datetime(value, out);
    }

    fn encode_date(&self, value: &NaiveDate, out: &mut String) {
        self.0.encode_date(value, out);
    }

    fn encode_time(&self, value: &NaiveTime, out: &mut String) {
        self.0.encode_time(value, out);
    }

    fn write_placeholder(&self, index: usize, out: &mut String) {
        self.0.write_placeholder(index, out);
    }

    fn interpolates(&self) -> bool {
        false
    }

    fn supports(&self, feature: Feature) -> bool {
        self.0.supports(feature)
    }

    fn upsert_style(&self) -> Option<UpsertStyle> {
        self.0.upsert_style()
    }

    fn allows_empty_from(&self) -> bool {
        self.0.allows_empty_from()
    }
}

/// Append the hex form of `bytes` to `out`.
pub(crate) fn push_hex(bytes: &[u8], out: &mut String) {
    for b in bytes {
        let _ = write!(out, "{b:02x}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_ident_splits_dotted_paths() {
        let mut out = String::new();
        Mysql.quote_ident("db.users", &mut out).unwrap();
        assert_eq!(out, "`db`.`users`");
    }

    #[test]
    fn quote_ident_passes_star_through() {
        let mut out = String::new();
        Postgres.quote_ident("u.*", &mut out).unwrap();
        assert_eq!(out, "\"u\".*");
    }

    #[test]
    fn quote_ident_doubles_embedded_quotes() {
        let mut out = String::new();
        Mysql.quote_ident("weird`name", &mut out).unwrap();
        assert_eq!(out, "`weird``name`");
    }

    #[test]
    fn quote_ident_rejects_nul() {
        let mut out = String::new();
        let err = Postgres.quote_ident("bad\0name", &mut out).unwrap_err();
        assert!(err.is_escape());
    }

    #[test]
    fn prepared_disables_interpolation_only() {
        let d = Prepared(Postgres);
        assert!(!d.interpolates());
        assert!(Postgres.interpolates());
        assert_eq!(d.name(), "postgres");
        assert_eq!(d.quote_char(), '"');
    }

    #[test]
    fn upsert_style_agrees_with_capability() {
        let dialects: [&dyn Dialect; 4] = [&Mysql, &Postgres, &Sqlite, &ClickHouse];
        for d in dialects {
            assert_eq!(
                d.supports(Feature::Upsert),
                d.upsert_style().is_some(),
                "{}",
                d.name()
            );
        }
    }

    #[test]
    fn one_dialect_lacks_transactions() {
        assert!(Mysql.supports(Feature::Transactions));
        assert!(Postgres.supports(Feature::Transactions));
        assert!(Sqlite.supports(Feature::Transactions));
        assert!(!ClickHouse.supports(Feature::Transactions));
    }
}
