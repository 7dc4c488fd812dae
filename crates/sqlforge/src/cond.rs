//! Composable boolean predicates for WHERE/HAVING/ON clauses.
//!
//! A [`Cond`] is a tree: comparison leaves, AND/OR combinators, NOT, and raw
//! template fragments. Combinators parenthesize every child before joining,
//! so operator precedence is correct regardless of nesting depth.

use crate::dialect::Dialect;
use crate::error::RenderResult;
use crate::interpolate;
use crate::render::{Buffer, Render};
use crate::value::Value;

/// Comparison operator for [`Cond::Compare`] leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    /// `=` (switches to `IS NULL` / `IN` for null/list values)
    Eq,
    /// `!=` (switches to `IS NOT NULL` / `NOT IN` for null/list values)
    Neq,
    /// `>`
    Gt,
    /// `>=`
    Gte,
    /// `<`
    Lt,
    /// `<=`
    Lte,
    /// `LIKE`
    Like,
    /// `NOT LIKE`
    NotLike,
}

impl CmpOp {
    fn as_str(&self) -> &'static str {
        match self {
            CmpOp::Eq => "=",
            CmpOp::Neq => "!=",
            CmpOp::Gt => ">",
            CmpOp::Gte => ">=",
            CmpOp::Lt => "<",
            CmpOp::Lte => "<=",
            CmpOp::Like => "LIKE",
            CmpOp::NotLike => "NOT LIKE",
        }
    }
}

/// A boolean predicate node.
#[derive(Debug, Clone)]
pub enum Cond {
    /// `<quoted column> <op> <value>`
    Compare {
        column: String,
        op: CmpOp,
        value: Value,
    },
    /// All children must hold; each child is parenthesized and joined
    /// with `AND`. Empty renders the vacuous truth `1=1`.
    All(Vec<Cond>),
    /// At least one child must hold; each child is parenthesized and joined
    /// with `OR`. Empty renders `1=0`.
    Any(Vec<Cond>),
    /// Negation, rendered as `NOT (inner)`.
    Not(Box<Cond>),
    /// Raw template with `?` substitution markers.
    Expr { template: String, args: Vec<Value> },
}

impl Cond {
    fn cmp(column: impl Into<String>, op: CmpOp, value: impl Into<Value>) -> Self {
        Cond::Compare {
            column: column.into(),
            op,
            value: value.into(),
        }
    }

    /// `column = value`; renders `IS NULL` for null and `IN (...)` for lists.
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::cmp(column, CmpOp::Eq, value)
    }

    /// `column != value`; renders `IS NOT NULL` for null and `NOT IN (...)`
    /// for lists.
    pub fn neq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::cmp(column, CmpOp::Neq, value)
    }

    /// `column > value`
    pub fn gt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::cmp(column, CmpOp::Gt, value)
    }

    /// `column >= value`
    pub fn gte(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::cmp(column, CmpOp::Gte, value)
    }

    /// `column < value`
    pub fn lt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::cmp(column, CmpOp::Lt, value)
    }

    /// `column <= value`
    pub fn lte(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::cmp(column, CmpOp::Lte, value)
    }

    /// `column LIKE pattern`
    pub fn like(column: impl Into<String>, pattern: impl Into<Value>) -> Self {
        Self::cmp(column, CmpOp::Like, pattern)
    }

    /// `column NOT LIKE pattern`
    pub fn not_like(column: impl Into<String>, pattern: impl Into<Value>) -> Self {
        Self::cmp(column, CmpOp::NotLike, pattern)
    }

    /// AND combinator over the given conditions.
    pub fn and(conds: impl IntoIterator<Item = Cond>) -> Self {
        Cond::All(conds.into_iter().collect())
    }

    /// OR combinator over the given conditions.
    pub fn or(conds: impl IntoIterator<Item = Cond>) -> Self {
        Cond::Any(conds.into_iter().collect())
    }

    /// Negate a condition.
    pub fn not(cond: Cond) -> Self {
        Cond::Not(Box::new(cond))
    }

    /// Raw template condition with `?` substitution markers.
    pub fn expr<I, T>(template: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Cond::Expr {
            template: template.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Raw SQL condition without arguments.
    pub fn raw(sql: impl Into<String>) -> Self {
        Cond::Expr {
            template: sql.into(),
            args: Vec::new(),
        }
    }
}

impl Render for Cond {
    fn render(&self, dialect: &dyn Dialect, buf: &mut Buffer) -> RenderResult<()> {
        match self {
            Cond::Compare { column, op, value } => match (op, value) {
                (CmpOp::Eq, Value::Null) => {
                    buf.write_ident(dialect, column)?;
                    buf.write_str(" IS NULL");
                    Ok(())
                }
                (CmpOp::Neq, Value::Null) => {
                    buf.write_ident(dialect, column)?;
                    buf.write_str(" IS NOT NULL");
                    Ok(())
                }
                (CmpOp::Eq, Value::List(items)) if items.is_empty() => {
                    buf.write_str("1=0");
                    Ok(())
                }
                (CmpOp::Neq, Value::List(items)) if items.is_empty() => {
                    buf.write_str("1=1");
                    Ok(())
                }
                (CmpOp::Eq, Value::List(_)) => {
                    buf.write_ident(dialect, column)?;
                    buf.write_str(" IN ");
                    buf.write_value(dialect, value)
                }
                (CmpOp::Neq, Value::List(_)) => {
                    buf.write_ident(dialect, column)?;
                    buf.write_str(" NOT IN ");
                    buf.write_value(dialect, value)
                }
                _ => {
                    buf.write_ident(dialect, column)?;
                    buf.write_str(" ");
                    buf.write_str(op.as_str());
                    buf.write_str(" ");
                    buf.write_value(dialect, value)
                }
            },
            Cond::All(conds) => {
                if conds.is_empty() {
                    buf.write_str("1=1");
                    return Ok(());
                }
                render_cond_list(conds, " AND ", dialect, buf)
            }
            Cond::Any(conds) => {
                if conds.is_empty() {
                    buf.write_str("1=0");
                    return Ok(());
                }
                render_cond_list(conds, " OR ", dialect, buf)
            }
            Cond::Not(inner) => {
                buf.write_str("NOT (");
                inner.render(dialect, buf)?;
                buf.write_str(")");
                Ok(())
            }
            Cond::Expr { template, args } => {
                interpolate::expand_template(dialect, buf, template, args)
            }
        }
    }
}

/// Render each condition parenthesized, joined by `sep`.
///
/// WHERE/HAVING clauses use this with `" AND "` for their top-level
/// condition lists, so a lone comparison still renders as `(...)`.
pub(crate) fn render_cond_list(
    conds: &[Cond],
    sep: &str,
    dialect: &dyn Dialect,
    buf: &mut Buffer,
) -> RenderResult<()> {
    for (i, cond) in conds.iter().enumerate() {
        if i > 0 {
            buf.write_str(sep);
        }
        buf.write_str("(");
        cond.render(dialect, buf)?;
        buf.write_str(")");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{Mysql, Prepared};
    use crate::error::RenderError;
    use crate::render::render;

    #[test]
    fn simple_comparison() {
        let q = render(&Cond::eq("id", 7), &Mysql).unwrap();
        assert_eq!(q.sql, "`id` = 7");
    }

    #[test]
    fn null_switches_to_is_null() {
        let q = render(&Cond::eq("x", Value::Null), &Mysql).unwrap();
        assert_eq!(q.sql, "`x` IS NULL");
        let q = render(&Cond::neq("x", Value::Null), &Mysql).unwrap();
        assert_eq!(q.sql, "`x` IS NOT NULL");
    }

    #[test]
    fn list_switches_to_in() {
        let q = render(&Cond::eq("id", vec![1i64, 2, 3]), &Mysql).unwrap();
        assert_eq!(q.sql, "`id` IN (1, 2, 3)");
        let q = render(&Cond::neq("id", vec![1i64, 2]), &Mysql).unwrap();
        assert_eq!(q.sql, "`id` NOT IN (1, 2)");
    }

    #[test]
    fn list_parameterizes_when_prepared() {
        let q = render(&Cond::eq("id", vec![1i64, 2, 3]), &Prepared(Mysql)).unwrap();
        assert_eq!(q.sql, "`id` IN (?, ?, ?)");
        assert_eq!(q.params, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
    }

    #[test]
    fn empty_in_list_is_always_false() {
        let q = render(&Cond::eq("id", Vec::<i64>::new()), &Mysql).unwrap();
        assert_eq!(q.sql, "1=0");
        let q = render(&Cond::neq("id", Vec::<i64>::new()), &Mysql).unwrap();
        assert_eq!(q.sql, "1=1");
    }

    #[test]
    fn map_value_compares_against_keys() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(1i64, "a");
        map.insert(2i64, "b");
        let q = render(&Cond::eq("id", map), &Mysql).unwrap();
        assert_eq!(q.sql, "`id` IN (1, 2)");
    }

    #[test]
    fn combinators_parenthesize_every_child() {
        let cond = Cond::and([
            Cond::or([Cond::gt("a", 1), Cond::lte("a", 2)]),
            Cond::eq("b", "x"),
        ]);
        let q = render(&cond, &Prepared(Mysql)).unwrap();
        assert_eq!(q.sql, "((`a` > ?) OR (`a` <= ?)) AND (`b` = ?)");
        assert_eq!(
            q.params,
            vec![Value::Int(1), Value::Int(2), Value::Str("x".into())]
        );
    }

    #[test]
    fn deep_nesting_stays_parenthesized() {
        let cond = Cond::or([
            Cond::and([Cond::eq("a", 1), Cond::eq("b", 2)]),
            Cond::eq("c", 3),
        ]);
        let q = render(&cond, &Mysql).unwrap();
        assert_eq!(q.sql, "((`a` = 1) AND (`b` = 2)) OR (`c` = 3)");
    }

    #[test]
    fn empty_combinators_render_constants() {
        let q = render(&Cond::and(Vec::new()), &Mysql).unwrap();
        assert_eq!(q.sql, "1=1");
        let q = render(&Cond::or(Vec::new()), &Mysql).unwrap();
        assert_eq!(q.sql, "1=0");
    }

    #[test]
    fn not_wraps_inner() {
        let q = render(&Cond::not(Cond::eq("banned", true)), &Mysql).unwrap();
        assert_eq!(q.sql, "NOT (`banned` = 1)");
    }

    #[test]
    fn like_renders_pattern() {
        let q = render(&Cond::like("name", "%ali%"), &Mysql).unwrap();
        assert_eq!(q.sql, "`name` LIKE '%ali%'");
    }

    #[test]
    fn expr_condition_expands_template() {
        let q = render(&Cond::expr("a = ? OR b = ?", vec![1, 2]), &Mysql).unwrap();
        assert_eq!(q.sql, "a = 1 OR b = 2");
    }

    #[test]
    fn expr_condition_mismatch_fails() {
        let err = render(&Cond::expr("a = ?", Vec::<i32>::new()), &Mysql).unwrap_err();
        assert!(matches!(err, RenderError::PlaceholderMismatch { .. }));
    }
}
