//! DELETE statement builder.

use crate::cond::{Cond, render_cond_list};
use crate::dialect::{Dialect, Feature};
use crate::error::{RenderError, RenderResult};
use crate::render::{Buffer, Render};

/// DELETE statement builder. The WHERE clause is optional; a DELETE without
/// one removes every row.
#[derive(Debug, Clone)]
pub struct DeleteStmt {
    table: String,
    where_conds: Vec<Cond>,
    returning: Vec<String>,
}

impl DeleteStmt {
    /// Create a DELETE for the given table.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            where_conds: Vec::new(),
            returning: Vec::new(),
        }
    }

    /// Add a WHERE condition. Multiple calls are ANDed, each parenthesized.
    pub fn where_(mut self, cond: Cond) -> Self {
        self.where_conds.push(cond);
        self
    }

    /// Set RETURNING columns (raw fragments). Requires dialect support.
    pub fn returning<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.returning = columns.into_iter().map(Into::into).collect();
        self
    }
}

impl Render for DeleteStmt {
    fn render(&self, dialect: &dyn Dialect, buf: &mut Buffer) -> RenderResult<()> {
        if self.table.is_empty() {
            return Err(RenderError::MissingTable);
        }
        if !self.returning.is_empty() && !dialect.supports(Feature::Returning) {
            return Err(RenderError::Unsupported {
                dialect: dialect.name(),
                feature: Feature::Returning,
            });
        }

        buf.write_str("DELETE FROM ");
        buf.write_ident(dialect, &self.table)?;

        if !self.where_conds.is_empty() {
            buf.write_str(" WHERE ");
            render_cond_list(&self.where_conds, " AND ", dialect, buf)?;
        }

        if !self.returning.is_empty() {
            buf.write_str(" RETURNING ");
            buf.write_str(&self.returning.join(", "));
        }

        Ok(())
    }
}
