//! UPDATE statement builder.

use crate::cond::{Cond, render_cond_list};
use crate::dialect::{Dialect, Feature};
use crate::error::{RenderError, RenderResult};
use crate::record::Record;
use crate::render::{Buffer, Render};
use crate::value::Value;

/// SET assignment value.
#[derive(Debug, Clone)]
enum SetValue {
    /// A concrete value
    Value(Value),
    /// A raw SQL expression
    Raw(String),
}

/// UPDATE statement builder.
#[derive(Debug, Clone)]
pub struct UpdateStmt {
    table: String,
    sets: Vec<(String, SetValue)>,
    where_conds: Vec<Cond>,
    returning: Vec<String>,
}

impl UpdateStmt {
    /// Create an UPDATE for the given table.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            sets: Vec::new(),
            where_conds: Vec::new(),
            returning: Vec::new(),
        }
    }

    /// Assign a value to a column. Column names are quoted.
    pub fn set(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.sets
            .push((column.to_string(), SetValue::Value(value.into())));
        self
    }

    /// Assign a raw SQL expression to a column.
    pub fn set_raw(mut self, column: &str, expr: &str) -> Self {
        self.sets
            .push((column.to_string(), SetValue::Raw(expr.to_string())));
        self
    }

    /// Append assignments produced by the record-mapping collaborator.
    pub fn set_record(mut self, record: &impl Record) -> Self {
        for (column, value) in record.fields() {
            self.sets.push((column, SetValue::Value(value)));
        }
        self
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

impl Render for UpdateStmt {
    fn render(&self, dialect: &dyn Dialect, buf: &mut Buffer) -> RenderResult<()> {
        if self.table.is_empty() {
            return Err(RenderError::MissingTable);
        }
        if self.sets.is_empty() {
            return Err(RenderError::NoAssignments);
        }
        if !self.returning.is_empty() && !dialect.supports(Feature::Returning) {
            return Err(RenderError::Unsupported {
                dialect: dialect.name(),
                feature: Feature::Returning,
            });
        }

        buf.write_str("UPDATE ");
        buf.write_ident(dialect, &self.table)?;
        buf.write_str(" SET ");
        for (i, (column, value)) in self.sets.iter().enumerate() {
            if i > 0 {
                buf.write_str(", ");
            }
            buf.write_ident(dialect, column)?;
            buf.write_str(" = ");
            match value {
                SetValue::Value(v) => buf.write_value(dialect, v)?,
                SetValue::Raw(expr) => buf.write_str(expr),
            }
        }

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
