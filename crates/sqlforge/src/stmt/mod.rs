//! Statement builders: SELECT, INSERT, UPDATE, DELETE, UNION.
//!
//! Builders are consuming (`fn method(mut self, ..) -> Self`) and terminated
//! by a single [`render`](crate::render()) call. A built tree is immutable
//! during rendering, so it can be rendered repeatedly against different
//! dialects.
//!
//! ```
//! use sqlforge::{render, select, Cond, Mysql};
//!
//! let stmt = select(["id", "name"])
//!     .from("users")
//!     .where_(Cond::eq("id", 7))
//!     .order_by("id")
//!     .limit(10);
//! let q = render(&stmt, &Mysql).unwrap();
//! assert_eq!(q.sql, "SELECT id, name FROM `users` WHERE (`id` = 7) ORDER BY id LIMIT 10");
//! ```

mod delete;
mod insert;
mod select;
mod union;
mod update;

pub use delete::DeleteStmt;
pub use insert::{InsertStmt, OnConflict, OnConflictUpdate};
pub use select::SelectStmt;
pub use union::UnionStmt;
pub use update::UpdateStmt;

use std::fmt;
use std::sync::Arc;

use crate::dialect::Dialect;
use crate::error::RenderResult;
use crate::render::{Buffer, Render};

/// Create a SELECT statement with the given projection.
///
/// Projection entries are raw fragments (column names, expressions,
/// `count(*)`) and are not quoted.
pub fn select<I, S>(columns: I) -> SelectStmt
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    SelectStmt::new(columns)
}

/// Create an INSERT statement for the given table.
pub fn insert_into(table: &str) -> InsertStmt {
    InsertStmt::new(table)
}

/// Create an UPDATE statement for the given table.
pub fn update(table: &str) -> UpdateStmt {
    UpdateStmt::new(table)
}

/// Create a DELETE statement for the given table.
pub fn delete_from(table: &str) -> DeleteStmt {
    DeleteStmt::new(table)
}

/// Create a UNION of two statements. Use [`UnionStmt::add`] for more members.
pub fn union(a: impl Render + 'static, b: impl Render + 'static) -> UnionStmt {
    UnionStmt::new().add(a).add(b)
}

/// Create a UNION ALL of two statements.
pub fn union_all(a: impl Render + 'static, b: impl Render + 'static) -> UnionStmt {
    UnionStmt::new_all().add(a).add(b)
}

/// A statement wrapped in parentheses and given an alias, for use as a
/// derived table or value.
///
/// Created by [`SelectStmt::as_table`] and [`UnionStmt::as_table`].
#[derive(Clone)]
pub struct Aliased {
    inner: Arc<dyn Render>,
    alias: String,
}

impl Aliased {
    pub(crate) fn new(inner: Arc<dyn Render>, alias: impl Into<String>) -> Self {
        Self {
            inner,
            alias: alias.into(),
        }
    }
}

impl fmt::Debug for Aliased {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aliased")
            .field("alias", &self.alias)
            .finish_non_exhaustive()
    }
}

impl Render for Aliased {
    fn render(&self, dialect: &dyn Dialect, buf: &mut Buffer) -> RenderResult<()> {
        buf.write_str("(");
        self.inner.render(dialect, buf)?;
        buf.write_str(") AS ");
        buf.write_ident(dialect, &self.alias)
    }
}
