//! Value interpolation and quote-aware template expansion.
//!
//! This module is the single point where values become SQL text. Statement
//! builders never format a value themselves; they hand it to the buffer,
//! which lands here. When the dialect interpolates, the value is written as
//! an escaped inline literal; otherwise a native placeholder is written and
//! the value is appended to the buffer's parameter list.
//!
//! Raw templates use `?` as the substitution marker. The scanner is an
//! explicit finite-state machine over four states (normal text, inside a
//! single-quoted literal, inside a double-quoted identifier, inside a
//! backtick-quoted identifier), so a `?` inside any quoted region is never
//! treated as a marker.

use std::fmt::Write;

use crate::dialect::Dialect;
use crate::error::{RenderError, RenderResult};
use crate::render::{Buffer, Render};
use crate::value::Value;

/// Write a value into the buffer per the dialect's interpolation policy.
pub(crate) fn write_value(
    dialect: &dyn Dialect,
    buf: &mut Buffer,
    value: &Value,
) -> RenderResult<()> {
    match value {
        Value::Expr(inner) => inner.render(dialect, buf),
        Value::List(items) => {
            if items.is_empty() {
                return Err(RenderError::EmptyList);
            }
            buf.write_str("(");
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    buf.write_str(", ");
                }
                if matches!(item, Value::List(_)) {
                    return Err(RenderError::UnsupportedType("list inside a list"));
                }
                write_value(dialect, buf, item)?;
            }
            buf.write_str(")");
            Ok(())
        }
        _ if dialect.interpolates() => write_literal(dialect, value, buf.sql_mut()),
        _ => {
            let index = buf.push_param(value.clone());
            dialect.write_placeholder(index, buf.sql_mut());
            Ok(())
        }
    }
}

/// Write a scalar value as an inline escaped literal.
pub(crate) fn write_literal(
    dialect: &dyn Dialect,
    value: &Value,
    out: &mut String,
) -> RenderResult<()> {
    match value {
        Value::Null => out.push_str("NULL"),
        Value::Bool(b) => out.push_str(dialect.encode_bool(*b)),
        Value::Int(i) => {
            let _ = write!(out, "{i}");
        }
        Value::UInt(u) => {
            let _ = write!(out, "{u}");
        }
        Value::Float(f) => {
            if !f.is_finite() {
                return Err(RenderError::Escape(format!(
                    "{f} is not a valid SQL numeric literal"
                )));
            }
            let _ = write!(out, "{f}");
        }
        Value::Str(s) => dialect.encode_string(s, out),
        Value::Bytes(b) => dialect.encode_bytes(b, out),
        Value::DateTime(t) => dialect.encode_datetime(t, out),
        Value::Date(d) => dialect.encode_date(d, out),
        Value::Time(t) => dialect.encode_time(t, out),
        Value::Uuid(u) => dialect.encode_string(&u.to_string(), out),
        Value::Json(j) => dialect.encode_string(&j.to_string(), out),
        #[cfg(feature = "rust_decimal")]
        Value::Decimal(d) => {
            let _ = write!(out, "{d}");
        }
        // Handled by write_value before literal encoding is reached.
        Value::List(_) | Value::Expr(_) => {
            return Err(RenderError::UnsupportedType(value.kind_name()));
        }
    }
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Normal,
    InSingleQuote,
    InDoubleQuote,
    InBacktick,
}

impl ScanState {
    fn step(self, ch: char) -> ScanState {
        match (self, ch) {
            (ScanState::Normal, '\'') => ScanState::InSingleQuote,
            (ScanState::Normal, '"') => ScanState::InDoubleQuote,
            (ScanState::Normal, '`') => ScanState::InBacktick,
            (ScanState::InSingleQuote, '\'') => ScanState::Normal,
            (ScanState::InDoubleQuote, '"') => ScanState::Normal,
            (ScanState::InBacktick, '`') => ScanState::Normal,
            (state, _) => state,
        }
    }
}

/// Count the `?` markers in `template` that sit outside quoted regions.
pub(crate) fn marker_count(template: &str) -> usize {
    let mut state = ScanState::Normal;
    let mut count = 0;
    for ch in template.chars() {
        if state == ScanState::Normal && ch == '?' {
            count += 1;
            continue;
        }
        state = state.step(ch);
    }
    count
}

/// Expand a raw template, substituting each unquoted `?` with the next
/// argument via the buffer's value-writing path.
///
/// The marker count must equal the argument count; a mismatch in either
/// direction fails before any substitution output is considered valid.
pub(crate) fn expand_template(
    dialect: &dyn Dialect,
    buf: &mut Buffer,
    template: &str,
    args: &[Value],
) -> RenderResult<()> {
    let markers = marker_count(template);
    if markers != args.len() {
        return Err(RenderError::PlaceholderMismatch {
            markers,
            values: args.len(),
        });
    }

    let mut state = ScanState::Normal;
    let mut next = args.iter();
    for ch in template.chars() {
        if state == ScanState::Normal && ch == '?' {
            // Counted above, so the iterator cannot run dry here.
            if let Some(value) = next.next() {
                buf.write_value(dialect, value)?;
            }
            continue;
        }
        state = state.step(ch);
        buf.sql_mut().push(ch);
    }
    Ok(())
}

/// A raw SQL fragment with `?` substitution markers.
///
/// Usable anywhere a [`Render`] implementor is accepted: as a condition
/// (via [`Cond::expr`](crate::Cond::expr)), as a value
/// (via [`Value::expr`]), or as a FROM source fragment.
#[derive(Clone)]
pub struct RawExpr {
    template: String,
    args: Vec<Value>,
}

impl std::fmt::Debug for RawExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawExpr")
            .field("template", &self.template)
            .field("args", &self.args)
            .finish()
    }
}

/// Create a raw SQL fragment with `?` substitution markers.
///
/// ```
/// use sqlforge::{expr, render, Mysql};
///
/// let fragment = expr("coalesce(score, ?)", [0]);
/// let q = render(&fragment, &Mysql).unwrap();
/// assert_eq!(q.sql, "coalesce(score, 0)");
/// ```
pub fn expr<I, T>(template: impl Into<String>, args: I) -> RawExpr
where
    I: IntoIterator<Item = T>,
    T: Into<Value>,
{
    RawExpr {
        template: template.into(),
        args: args.into_iter().map(Into::into).collect(),
    }
}

impl Render for RawExpr {
    fn render(&self, dialect: &dyn Dialect, buf: &mut Buffer) -> RenderResult<()> {
        expand_template(dialect, buf, &self.template, &self.args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{ClickHouse, Mysql, Postgres, Prepared, Sqlite};
    use crate::render::render;

    fn literal(dialect: &dyn Dialect, value: Value) -> String {
        let mut buf = Buffer::new();
        buf.write_value(dialect, &value).unwrap();
        assert!(buf.params().is_empty());
        buf.into_query().sql
    }

    #[test]
    fn null_renders_bare() {
        assert_eq!(literal(&Mysql, Value::Null), "NULL");
    }

    #[test]
    fn booleans_follow_dialect_spelling() {
        assert_eq!(literal(&Mysql, Value::Bool(true)), "1");
        assert_eq!(literal(&Postgres, Value::Bool(true)), "TRUE");
        assert_eq!(literal(&Postgres, Value::Bool(false)), "FALSE");
        assert_eq!(literal(&Sqlite, Value::Bool(false)), "0");
    }

    #[test]
    fn numbers_render_as_plain_decimals() {
        assert_eq!(literal(&Mysql, Value::Int(-42)), "-42");
        assert_eq!(literal(&Mysql, Value::UInt(18_446_744_073_709_551_615)), "18446744073709551615");
        assert_eq!(literal(&Mysql, Value::Float(1.5)), "1.5");
    }

    #[test]
    fn non_finite_floats_fail_escape() {
        let mut buf = Buffer::new();
        let err = buf.write_value(&Mysql, &Value::Float(f64::NAN)).unwrap_err();
        assert!(err.is_escape());
        let mut buf = Buffer::new();
        let err = buf
            .write_value(&Mysql, &Value::Float(f64::INFINITY))
            .unwrap_err();
        assert!(err.is_escape());
    }

    #[test]
    fn strings_escape_per_dialect() {
        assert_eq!(literal(&Mysql, Value::from("O'Brien")), r"'O\'Brien'");
        assert_eq!(literal(&Postgres, Value::from("O'Brien")), "'O''Brien'");
        assert_eq!(literal(&Sqlite, Value::from("O'Brien")), "'O''Brien'");
        assert_eq!(literal(&ClickHouse, Value::from("O'Brien")), r"'O\'Brien'");
    }

    #[test]
    fn uuid_renders_as_string_literal() {
        let u = uuid::Uuid::nil();
        assert_eq!(
            literal(&Postgres, Value::Uuid(u)),
            "'00000000-0000-0000-0000-000000000000'"
        );
    }

    #[test]
    fn json_renders_compact_string_literal() {
        let j = serde_json::json!({"a": 1});
        assert_eq!(literal(&Postgres, Value::Json(j)), r#"'{"a":1}'"#);
    }

    #[test]
    fn temporal_values_render_quoted() {
        let d = chrono::NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(literal(&Mysql, Value::Date(d)), "'2024-03-09'");
        let t = chrono::NaiveTime::from_hms_micro_opt(13, 5, 0, 250).unwrap();
        assert_eq!(literal(&Mysql, Value::Time(t)), "'13:05:00.000250'");
        let dt = chrono::DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        assert_eq!(literal(&Mysql, Value::DateTime(dt)), "'2023-11-14 22:13:20.000000'");
    }

    #[test]
    fn list_renders_parenthesized_elements() {
        assert_eq!(literal(&Mysql, Value::from(vec![1i64, 2, 3])), "(1, 2, 3)");
        assert_eq!(
            literal(&Postgres, Value::from(vec!["a", "b"])),
            "('a', 'b')"
        );
    }

    #[test]
    fn list_parameterizes_each_element() {
        let d = Prepared(Postgres);
        let mut buf = Buffer::new();
        buf.write_value(&d, &Value::from(vec![1i64, 2, 3])).unwrap();
        let q = buf.into_query();
        assert_eq!(q.sql, "($1, $2, $3)");
        assert_eq!(q.params, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
    }

    #[test]
    fn empty_list_is_an_argument_error() {
        let mut buf = Buffer::new();
        let err = buf
            .write_value(&Mysql, &Value::List(Vec::new()))
            .unwrap_err();
        assert!(matches!(err, RenderError::EmptyList));
    }

    #[test]
    fn nested_list_is_unsupported() {
        let nested = Value::List(vec![Value::from(vec![1i64])]);
        let mut buf = Buffer::new();
        let err = buf.write_value(&Mysql, &nested).unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedType(_)));
    }

    #[test]
    fn expr_value_delegates_in_both_modes() {
        let v = Value::expr(expr("now()", Vec::<Value>::new()));
        assert_eq!(literal(&Mysql, v.clone()), "now()");
        let d = Prepared(Mysql);
        let mut buf = Buffer::new();
        buf.write_value(&d, &v).unwrap();
        assert_eq!(buf.sql(), "now()");
        assert!(buf.params().is_empty());
    }

    #[test]
    fn marker_count_skips_quoted_regions() {
        assert_eq!(marker_count("a = ? AND b = ?"), 2);
        assert_eq!(marker_count("a = '?' AND b = ?"), 1);
        assert_eq!(marker_count(r#""col?" = ?"#), 1);
        assert_eq!(marker_count("`col?` = ?"), 1);
        assert_eq!(marker_count("no markers"), 0);
    }

    #[test]
    fn template_substitutes_in_order() {
        let q = render(&expr("a = ? OR b = ?", vec![Value::from(1i64), Value::from("x")]), &Mysql)
            .unwrap();
        assert_eq!(q.sql, "a = 1 OR b = 'x'");
    }

    #[test]
    fn template_keeps_markers_inside_literals() {
        let q = render(&expr("a = '?' AND b = ?", [5]), &Mysql).unwrap();
        assert_eq!(q.sql, "a = '?' AND b = 5");
    }

    #[test]
    fn template_with_placeholders_in_prepared_mode() {
        let q = render(&expr("a = ? AND b = ?", vec![1i64, 2]), &Prepared(Postgres)).unwrap();
        assert_eq!(q.sql, "a = $1 AND b = $2");
        assert_eq!(q.params, vec![Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn too_few_arguments_fail() {
        let err = render(&expr("a = ? AND b = ?", [1]), &Mysql).unwrap_err();
        assert!(matches!(
            err,
            RenderError::PlaceholderMismatch {
                markers: 2,
                values: 1
            }
        ));
    }

    #[test]
    fn too_many_arguments_fail() {
        let err = render(&expr("a = ?", vec![1, 2]), &Mysql).unwrap_err();
        assert!(matches!(
            err,
            RenderError::PlaceholderMismatch {
                markers: 1,
                values: 2
            }
        ));
    }
}
