//! # sqlforge
//!
//! A dialect-aware SQL statement builder with injection-safe value
//! interpolation.
//!
//! ## Features
//!
//! - **Statement builders**: SELECT / INSERT / UPDATE / DELETE / UNION as
//!   plain immutable trees, terminated by a single [`render`] call
//! - **Inline or parameterized**: a dialect either interpolates values as
//!   escaped literals (no prepared-statement round trip) or, wrapped in
//!   [`Prepared`], emits native placeholders plus an ordered parameter list
//! - **Multiple backends**: MySQL, PostgreSQL, SQLite and ClickHouse rules
//!   for quoting, escaping, placeholders and feature support
//! - **Composable conditions**: AND/OR/NOT trees that stay correctly
//!   parenthesized at any nesting depth
//! - **Loud failures**: incomplete statements, argument mismatches and
//!   missing dialect capabilities all fail at render time; malformed SQL is
//!   never produced
//!
//! ## Example
//!
//! ```
//! use sqlforge::{render, select, Cond, Mysql, Prepared};
//!
//! let stmt = select(["id", "name"])
//!     .from("users")
//!     .where_(Cond::eq("id", 7))
//!     .order_by("id")
//!     .limit(10);
//!
//! // Interpolated: values are inlined as escaped literals.
//! let q = render(&stmt, &Mysql).unwrap();
//! assert_eq!(q.sql, "SELECT id, name FROM `users` WHERE (`id` = 7) ORDER BY id LIMIT 10");
//! assert!(q.params.is_empty());
//!
//! // Parameterized: native placeholders plus an ordered parameter list.
//! let q = render(&stmt, &Prepared(Mysql)).unwrap();
//! assert_eq!(q.sql, "SELECT id, name FROM `users` WHERE (`id` = ?) ORDER BY id LIMIT 10");
//! assert_eq!(q.params.len(), 1);
//! ```
//!
//! Executing the rendered [`Query`] against a connection is the caller's
//! concern; this crate stops at text and parameters.

pub mod cond;
pub mod dialect;
pub mod error;
pub mod interpolate;
pub mod record;
pub mod render;
pub mod stmt;
pub mod value;

pub use cond::{CmpOp, Cond};
pub use dialect::{ClickHouse, Dialect, Feature, Mysql, Postgres, Prepared, Sqlite, UpsertStyle};
pub use error::{ErrorKind, RenderError, RenderResult};
pub use interpolate::{RawExpr, expr};
pub use record::Record;
pub use render::{Buffer, Query, Render, render};
pub use value::Value;

// Re-export statement builders and their free constructors.
pub use stmt::{
    Aliased, DeleteStmt, InsertStmt, OnConflict, OnConflictUpdate, SelectStmt, UnionStmt,
    UpdateStmt, delete_from, insert_into, select, union, union_all, update,
};
