//! SELECT statement builder.

use std::fmt;
use std::sync::Arc;

use crate::cond::{Cond, render_cond_list};
use crate::dialect::Dialect;
use crate::error::{RenderError, RenderResult};
use crate::render::{Buffer, Render};
use crate::stmt::Aliased;

/// The FROM source of a SELECT.
#[derive(Clone)]
enum Source {
    Table(String),
    Query {
        query: Arc<dyn Render>,
        alias: Option<String>,
    },
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Table(name) => f.debug_tuple("Table").field(name).finish(),
            Source::Query { alias, .. } => f
                .debug_struct("Query")
                .field("alias", alias)
                .finish_non_exhaustive(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
}

impl JoinKind {
    fn keyword(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Full => "FULL OUTER JOIN",
        }
    }
}

#[derive(Debug, Clone)]
struct Join {
    kind: JoinKind,
    table: String,
    on: Cond,
}

/// SELECT statement builder.
#[derive(Debug, Clone)]
pub struct SelectStmt {
    distinct: bool,
    projection: Vec<String>,
    source: Option<Source>,
    joins: Vec<Join>,
    where_conds: Vec<Cond>,
    group_by: Vec<String>,
    having: Vec<Cond>,
    order_by: Vec<String>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl SelectStmt {
    /// Create a SELECT with the given projection. An empty projection
    /// defaults to `*`.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            distinct: false,
            projection: columns.into_iter().map(Into::into).collect(),
            source: None,
            joins: Vec::new(),
            where_conds: Vec::new(),
            group_by: Vec::new(),
            having: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// Emit `SELECT DISTINCT`.
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Set the FROM table. The name is quoted; dotted paths are supported.
    pub fn from(mut self, table: &str) -> Self {
        self.source = Some(Source::Table(table.to_string()));
        self
    }

    /// Use a sub-statement as the FROM source.
    ///
    /// Subquery sources must carry an alias; prefer [`Self::from_query_as`].
    /// Rendering a query source without an alias fails.
    pub fn from_query(mut self, query: impl Render + 'static) -> Self {
        self.source = Some(Source::Query {
            query: Arc::new(query),
            alias: None,
        });
        self
    }

    /// Use a sub-statement as the FROM source under the given alias.
    pub fn from_query_as(mut self, query: impl Render + 'static, alias: &str) -> Self {
        self.source = Some(Source::Query {
            query: Arc::new(query),
            alias: Some(alias.to_string()),
        });
        self
    }

    fn join(mut self, kind: JoinKind, table: &str, on: Cond) -> Self {
        self.joins.push(Join {
            kind,
            table: table.to_string(),
            on,
        });
        self
    }

    /// Add an INNER JOIN with an ON predicate.
    pub fn inner_join(self, table: &str, on: Cond) -> Self {
        self.join(JoinKind::Inner, table, on)
    }

    /// Add a LEFT JOIN with an ON predicate.
    pub fn left_join(self, table: &str, on: Cond) -> Self {
        self.join(JoinKind::Left, table, on)
    }

    /// Add a RIGHT JOIN with an ON predicate.
    pub fn right_join(self, table: &str, on: Cond) -> Self {
        self.join(JoinKind::Right, table, on)
    }

    /// Add a FULL OUTER JOIN with an ON predicate.
    pub fn full_join(self, table: &str, on: Cond) -> Self {
        self.join(JoinKind::Full, table, on)
    }

    /// Add a WHERE condition. Multiple calls are ANDed, each parenthesized.
    pub fn where_(mut self, cond: Cond) -> Self {
        self.where_conds.push(cond);
        self
    }

    /// Add a GROUP BY expression (raw fragment, not quoted).
    pub fn group_by(mut self, expr: &str) -> Self {
        self.group_by.push(expr.to_string());
        self
    }

    /// Add a HAVING condition. Multiple calls are ANDed, each parenthesized.
    pub fn having(mut self, cond: Cond) -> Self {
        self.having.push(cond);
        self
    }

    /// Add an ORDER BY expression (raw fragment, not quoted).
    pub fn order_by(mut self, expr: &str) -> Self {
        self.order_by.push(expr.to_string());
        self
    }

    /// Add `ORDER BY <expr> ASC`.
    pub fn order_asc(mut self, expr: &str) -> Self {
        self.order_by.push(format!("{expr} ASC"));
        self
    }

    /// Add `ORDER BY <expr> DESC`.
    pub fn order_desc(mut self, expr: &str) -> Self {
        self.order_by.push(format!("{expr} DESC"));
        self
    }

    /// Set LIMIT. Emitted only when set.
    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Set OFFSET. Emitted only when set.
    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    /// Pagination helper: `page` is 1-based (clamped to >= 1), `per_page`
    /// clamped to >= 1.
    pub fn paginate(mut self, page: u64, per_page: u64) -> Self {
        let p = page.max(1);
        let size = per_page.max(1);
        self.limit = Some(size);
        self.offset = Some((p - 1) * size);
        self
    }

    /// Wrap this SELECT in parentheses under an alias, for use as a derived
    /// table or value.
    pub fn as_table(self, alias: &str) -> Aliased {
        Aliased::new(Arc::new(self), alias)
    }
}

impl Render for SelectStmt {
    fn render(&self, dialect: &dyn Dialect, buf: &mut Buffer) -> RenderResult<()> {
        buf.write_str("SELECT ");
        if self.distinct {
            buf.write_str("DISTINCT ");
        }
        if self.projection.is_empty() {
            buf.write_str("*");
        } else {
            buf.write_str(&self.projection.join(", "));
        }

        match &self.source {
            Some(Source::Table(table)) => {
                if table.is_empty() {
                    return Err(RenderError::MissingTable);
                }
                buf.write_str(" FROM ");
                buf.write_ident(dialect, table)?;
            }
            Some(Source::Query { query, alias }) => {
                let Some(alias) = alias else {
                    return Err(RenderError::MissingAlias);
                };
                buf.write_str(" FROM (");
                query.render(dialect, buf)?;
                buf.write_str(") AS ");
                buf.write_ident(dialect, alias)?;
            }
            None => {
                if !dialect.allows_empty_from() {
                    return Err(RenderError::MissingFrom);
                }
            }
        }

        for join in &self.joins {
            buf.write_str(" ");
            buf.write_str(join.kind.keyword());
            buf.write_str(" ");
            buf.write_ident(dialect, &join.table)?;
            buf.write_str(" ON (");
            join.on.render(dialect, buf)?;
            buf.write_str(")");
        }

        if !self.where_conds.is_empty() {
            buf.write_str(" WHERE ");
            render_cond_list(&self.where_conds, " AND ", dialect, buf)?;
        }

        if !self.group_by.is_empty() {
            buf.write_str(" GROUP BY ");
            buf.write_str(&self.group_by.join(", "));
        }

        if !self.having.is_empty() {
            buf.write_str(" HAVING ");
            render_cond_list(&self.having, " AND ", dialect, buf)?;
        }

        if !self.order_by.is_empty() {
            buf.write_str(" ORDER BY ");
            buf.write_str(&self.order_by.join(", "));
        }

        if let Some(limit) = self.limit {
            buf.write_str(&format!(" LIMIT {limit}"));
        }

        if let Some(offset) = self.offset {
            buf.write_str(&format!(" OFFSET {offset}"));
        }

        Ok(())
    }
}
