//! The render contract and the text/parameter accumulator.
//!
//! Everything that can appear in a statement tree implements [`Render`]:
//! the statement builders, conditions, raw fragments, and any caller-supplied
//! type. Rendering is a pure function of `(tree, dialect)`: a tree is never
//! mutated by a render pass, so the same tree may be rendered repeatedly,
//! concurrently, into different buffers or dialects.

use crate::dialect::Dialect;
use crate::error::RenderResult;
use crate::interpolate;
use crate::value::Value;

/// The capability of rendering oneself into a [`Buffer`] for a dialect.
///
/// Implement this on your own types to embed raw expressions or custom
/// sub-statements anywhere a builder is accepted.
pub trait Render: Send + Sync {
    /// Append this node's SQL fragment to `buf`.
    ///
    /// On error the buffer contents are invalid and must be discarded.
    fn render(&self, dialect: &dyn Dialect, buf: &mut Buffer) -> RenderResult<()>;
}

/// Accumulates rendered SQL text and, when interpolation is disabled, an
/// ordered parameter list.
///
/// Within one render pass a buffer is either fully interpolated (inline
/// literals, empty parameter list) or fully parameterized (placeholders plus
/// parameters); the mode is fixed by the dialect for the whole pass.
#[derive(Debug, Default)]
pub struct Buffer {
    sql: String,
    params: Vec<Value>,
}

impl Buffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// The SQL text accumulated so far.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// The parameters accumulated so far.
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Append raw SQL text.
    pub fn write_str(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    /// Append a quoted identifier.
    pub fn write_ident(&mut self, dialect: &dyn Dialect, ident: &str) -> RenderResult<()> {
        dialect.quote_ident(ident, &mut self.sql)
    }

    /// Append a value, either as an inline escaped literal or as a native
    /// placeholder plus parameter, per the dialect's interpolation policy.
    ///
    /// [`Value::Expr`] delegates to the wrapped builder in both modes;
    /// [`Value::List`] renders as a parenthesized, comma-joined list with
    /// each element written independently.
    pub fn write_value(&mut self, dialect: &dyn Dialect, value: &Value) -> RenderResult<()> {
        interpolate::write_value(dialect, self, value)
    }

    pub(crate) fn sql_mut(&mut self) -> &mut String {
        &mut self.sql
    }

    pub(crate) fn push_param(&mut self, value: Value) -> usize {
        self.params.push(value);
        self.params.len()
    }

    /// Consume the buffer into a finished [`Query`].
    pub fn into_query(self) -> Query {
        Query {
            sql: self.sql,
            params: self.params,
        }
    }
}

/// The result of rendering a statement tree: SQL text plus the ordered
/// parameter list (empty when the dialect interpolates inline).
///
/// This is what gets handed to the execution layer's
/// `execute(text, parameters)` contract.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Render a statement tree against a dialect into a fresh buffer.
///
/// This is the top-level entry point. Rendering never mutates the tree, so
/// repeated calls with the same inputs yield identical output.
pub fn render<S>(stmt: &S, dialect: &dyn Dialect) -> RenderResult<Query>
where
    S: Render + ?Sized,
{
    let mut buf = Buffer::new();
    stmt.render(dialect, &mut buf)?;
    #[cfg(feature = "tracing")]
    tracing::debug!(
        target: "sqlforge.render",
        dialect = dialect.name(),
        param_count = buf.params().len(),
        sql = %buf.sql(),
    );
    Ok(buf.into_query())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{Mysql, Postgres, Prepared};

    #[test]
    fn interpolating_pass_leaves_params_empty() {
        let mut buf = Buffer::new();
        buf.write_str("a = ");
        buf.write_value(&Mysql, &Value::Int(1)).unwrap();
        assert_eq!(buf.sql(), "a = 1");
        assert!(buf.params().is_empty());
    }

    #[test]
    fn parameterized_pass_collects_in_order() {
        let d = Prepared(Postgres);
        let mut buf = Buffer::new();
        buf.write_value(&d, &Value::Int(1)).unwrap();
        buf.write_str(", ");
        buf.write_value(&d, &Value::Str("x".into())).unwrap();
        assert_eq!(buf.sql(), "$1, $2");
        assert_eq!(buf.params(), &[Value::Int(1), Value::Str("x".into())]);
    }

    #[test]
    fn into_query_carries_both_parts() {
        let d = Prepared(Mysql);
        let mut buf = Buffer::new();
        buf.write_str("SELECT ");
        buf.write_value(&d, &Value::Bool(true)).unwrap();
        let q = buf.into_query();
        assert_eq!(q.sql, "SELECT ?");
        assert_eq!(q.params, vec![Value::Bool(true)]);
    }
}
