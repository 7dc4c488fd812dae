//! UNION / UNION ALL statement builder.

use std::fmt;
use std::sync::Arc;

use crate::dialect::Dialect;
use crate::error::{RenderError, RenderResult};
use crate::render::{Buffer, Render};
use crate::stmt::Aliased;

/// UNION statement: an ordered list of member statements joined by
/// `UNION` or `UNION ALL`.
#[derive(Clone)]
pub struct UnionStmt {
    all: bool,
    members: Vec<Arc<dyn Render>>,
}

impl fmt::Debug for UnionStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnionStmt")
            .field("all", &self.all)
            .field("members", &self.members.len())
            .finish()
    }
}

impl UnionStmt {
    /// Create an empty `UNION`.
    pub fn new() -> Self {
        Self {
            all: false,
            members: Vec::new(),
        }
    }

    /// Create an empty `UNION ALL`.
    pub fn new_all() -> Self {
        Self {
            all: true,
            members: Vec::new(),
        }
    }

    /// Append a member statement.
    pub fn add(mut self, member: impl Render + 'static) -> Self {
        self.members.push(Arc::new(member));
        self
    }

    /// Wrap this union in parentheses under an alias, for use as a derived
    /// table.
    pub fn as_table(self, alias: &str) -> Aliased {
        Aliased::new(Arc::new(self), alias)
    }
}

impl Default for UnionStmt {
    fn default() -> Self {
        Self::new()
    }
}

impl Render for UnionStmt {
    fn render(&self, dialect: &dyn Dialect, buf: &mut Buffer) -> RenderResult<()> {
        if self.members.is_empty() {
            return Err(RenderError::MissingMembers);
        }
        let keyword = if self.all { " UNION ALL " } else { " UNION " };
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                buf.write_str(keyword);
            }
            member.render(dialect, buf)?;
        }
        Ok(())
    }
}
