//! INSERT statement builder, including the upsert clause.

use crate::dialect::{Dialect, Feature, UpsertStyle};
use crate::error::{RenderError, RenderResult};
use crate::record::Record;
use crate::render::{Buffer, Render};
use crate::value::Value;

/// Conflict resolution action.
#[derive(Debug, Clone)]
pub(crate) enum ConflictAction {
    /// Skip conflicting rows (`DO NOTHING` / `INSERT IGNORE`)
    DoNothing,
    /// Update conflicting rows with the given per-column actions
    DoUpdate(Vec<(String, UpsertValue)>),
}

#[derive(Debug, Clone)]
pub(crate) enum UpsertValue {
    /// A concrete value
    Value(Value),
    /// The value proposed by the failed insert
    /// (`excluded.col` / `VALUES(col)` depending on the dialect)
    Proposed,
    /// A raw SQL expression
    Raw(String),
}

#[derive(Debug, Clone)]
struct ConflictClause {
    target: Vec<String>,
    action: ConflictAction,
}

/// INSERT statement builder.
#[derive(Debug, Clone)]
pub struct InsertStmt {
    table: String,
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    conflict: Option<ConflictClause>,
    returning: Vec<String>,
}

impl InsertStmt {
    /// Create an INSERT for the given table.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            columns: Vec::new(),
            rows: Vec::new(),
            conflict: None,
            returning: Vec::new(),
        }
    }

    /// Set the column list. Column names are quoted.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Append one row of values. Row length must match the column list.
    pub fn values<I, T>(mut self, row: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
        self
    }

    /// Append one (column, value) pair to a single-row insert.
    pub fn pair(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.columns.push(column.to_string());
        if self.rows.is_empty() {
            self.rows.push(Vec::new());
        }
        self.rows[0].push(value.into());
        self
    }

    /// Append a row produced by the record-mapping collaborator.
    ///
    /// The first record also sets the column list; later records must yield
    /// the same number of fields.
    pub fn record(mut self, record: &impl Record) -> Self {
        let fields = record.fields();
        if self.columns.is_empty() {
            self.columns = fields.iter().map(|(col, _)| col.clone()).collect();
        }
        self.rows
            .push(fields.into_iter().map(|(_, value)| value).collect());
        self
    }

    /// Start an upsert clause for the given conflict target columns.
    ///
    /// The target is used by `ON CONFLICT` dialects; `ON DUPLICATE KEY`
    /// dialects resolve conflicts through the table's own unique keys.
    pub fn on_conflict<I, S>(self, target: I) -> OnConflict
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        OnConflict {
            stmt: self,
            target: target.into_iter().map(Into::into).collect(),
        }
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

impl Render for InsertStmt {
    fn render(&self, dialect: &dyn Dialect, buf: &mut Buffer) -> RenderResult<()> {
        if self.table.is_empty() {
            return Err(RenderError::MissingTable);
        }
        if self.columns.is_empty() {
            return Err(RenderError::NoColumns);
        }
        if self.rows.is_empty() {
            return Err(RenderError::NoValues);
        }

        let style = match &self.conflict {
            Some(_) => match dialect.upsert_style() {
                Some(style) => Some(style),
                None => {
                    return Err(RenderError::Unsupported {
                        dialect: dialect.name(),
                        feature: Feature::Upsert,
                    });
                }
            },
            None => None,
        };
        if !self.returning.is_empty() && !dialect.supports(Feature::Returning) {
            return Err(RenderError::Unsupported {
                dialect: dialect.name(),
                feature: Feature::Returning,
            });
        }

        // MySQL spells "skip conflicting rows" as a statement modifier.
        let ignore = matches!(
            (&self.conflict, style),
            (
                Some(ConflictClause {
                    action: ConflictAction::DoNothing,
                    ..
                }),
                Some(UpsertStyle::OnDuplicateKey)
            )
        );
        buf.write_str(if ignore {
            "INSERT IGNORE INTO "
        } else {
            "INSERT INTO "
        });
        buf.write_ident(dialect, &self.table)?;

        buf.write_str(" (");
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                buf.write_str(", ");
            }
            buf.write_ident(dialect, column)?;
        }
        buf.write_str(") VALUES ");

        for (i, row) in self.rows.iter().enumerate() {
            if row.len() != self.columns.len() {
                return Err(RenderError::RowLength {
                    expected: self.columns.len(),
                    got: row.len(),
                });
            }
            if i > 0 {
                buf.write_str(", ");
            }
            buf.write_str("(");
            for (j, value) in row.iter().enumerate() {
                if j > 0 {
                    buf.write_str(", ");
                }
                buf.write_value(dialect, value)?;
            }
            buf.write_str(")");
        }

        if let (Some(clause), Some(style)) = (&self.conflict, style) {
            self.render_conflict(clause, style, dialect, buf)?;
        }

        if !self.returning.is_empty() {
            buf.write_str(" RETURNING ");
            buf.write_str(&self.returning.join(", "));
        }

        Ok(())
    }
}

impl InsertStmt {
    fn render_conflict(
        &self,
        clause: &ConflictClause,
        style: UpsertStyle,
        dialect: &dyn Dialect,
        buf: &mut Buffer,
    ) -> RenderResult<()> {
        match style {
            UpsertStyle::OnConflict => {
                buf.write_str(" ON CONFLICT (");
                for (i, column) in clause.target.iter().enumerate() {
                    if i > 0 {
                        buf.write_str(", ");
                    }
                    buf.write_ident(dialect, column)?;
                }
                buf.write_str(")");
                match &clause.action {
                    ConflictAction::DoNothing => {
                        buf.write_str(" DO NOTHING");
                        Ok(())
                    }
                    ConflictAction::DoUpdate(sets) => {
                        buf.write_str(" DO UPDATE SET ");
                        self.render_sets(sets, style, dialect, buf)
                    }
                }
            }
            UpsertStyle::OnDuplicateKey => match &clause.action {
                // Rendered as INSERT IGNORE, nothing to append.
                ConflictAction::DoNothing => Ok(()),
                ConflictAction::DoUpdate(sets) => {
                    buf.write_str(" ON DUPLICATE KEY UPDATE ");
                    self.render_sets(sets, style, dialect, buf)
                }
            },
        }
    }

    fn render_sets(
        &self,
        sets: &[(String, UpsertValue)],
        style: UpsertStyle,
        dialect: &dyn Dialect,
        buf: &mut Buffer,
    ) -> RenderResult<()> {
        if sets.is_empty() {
            return Err(RenderError::NoAssignments);
        }
        for (i, (column, value)) in sets.iter().enumerate() {
            if i > 0 {
                buf.write_str(", ");
            }
            buf.write_ident(dialect, column)?;
            buf.write_str(" = ");
            match value {
                UpsertValue::Value(v) => buf.write_value(dialect, v)?,
                UpsertValue::Raw(expr) => buf.write_str(expr),
                UpsertValue::Proposed => match style {
                    UpsertStyle::OnConflict => {
                        buf.write_str("excluded.");
                        buf.write_ident(dialect, column)?;
                    }
                    UpsertStyle::OnDuplicateKey => {
                        buf.write_str("VALUES(");
                        buf.write_ident(dialect, column)?;
                        buf.write_str(")");
                    }
                },
            }
        }
        Ok(())
    }
}

/// Upsert clause builder, created by [`InsertStmt::on_conflict`].
#[derive(Debug, Clone)]
pub struct OnConflict {
    stmt: InsertStmt,
    target: Vec<String>,
}

impl OnConflict {
    /// Skip conflicting rows.
    pub fn do_nothing(self) -> InsertStmt {
        let mut stmt = self.stmt;
        stmt.conflict = Some(ConflictClause {
            target: self.target,
            action: ConflictAction::DoNothing,
        });
        stmt
    }

    /// Update conflicting rows; configure assignments and call
    /// [`OnConflictUpdate::finish`].
    pub fn do_update(self) -> OnConflictUpdate {
        OnConflictUpdate {
            stmt: self.stmt,
            target: self.target,
            sets: Vec::new(),
        }
    }
}

/// Assignment builder for `DO UPDATE`, created by [`OnConflict::do_update`].
#[derive(Debug, Clone)]
pub struct OnConflictUpdate {
    stmt: InsertStmt,
    target: Vec<String>,
    sets: Vec<(String, UpsertValue)>,
}

impl OnConflictUpdate {
    /// Assign a concrete value on conflict.
    pub fn set(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.sets
            .push((column.to_string(), UpsertValue::Value(value.into())));
        self
    }

    /// Assign the value the failed insert proposed for this column
    /// (`excluded.col` on `ON CONFLICT` dialects, `VALUES(col)` on
    /// `ON DUPLICATE KEY` dialects).
    pub fn set_proposed(mut self, column: &str) -> Self {
        self.sets.push((column.to_string(), UpsertValue::Proposed));
        self
    }

    /// Assign a raw SQL expression on conflict.
    pub fn set_raw(mut self, column: &str, expr: &str) -> Self {
        self.sets
            .push((column.to_string(), UpsertValue::Raw(expr.to_string())));
        self
    }

    /// Finalize the upsert clause and return the INSERT.
    pub fn finish(self) -> InsertStmt {
        let mut stmt = self.stmt;
        stmt.conflict = Some(ConflictClause {
            target: self.target,
            action: ConflictAction::DoUpdate(self.sets),
        });
        stmt
    }
}
