//! Error types for sqlforge

use crate::dialect::Feature;
use thiserror::Error;

/// Result type alias for render operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Coarse error category.
///
/// Every [`RenderError`] variant belongs to exactly one of these groups, so
/// callers can branch on the class of failure without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The statement tree is incomplete (missing FROM, table, members, ...).
    Structural,
    /// A supplied value or argument list is unusable.
    Argument,
    /// The active dialect does not support a requested feature.
    Capability,
    /// A value cannot be rendered as a safe SQL literal.
    Escape,
}

/// Error types for statement rendering
#[derive(Debug, Error)]
pub enum RenderError {
    /// SELECT rendered without a source on a dialect that requires one
    #[error("SELECT requires a FROM source")]
    MissingFrom,

    /// Statement rendered with an empty table name
    #[error("statement requires a table name")]
    MissingTable,

    /// INSERT rendered without any columns
    #[error("INSERT requires at least one column")]
    NoColumns,

    /// INSERT rendered without any rows
    #[error("INSERT requires at least one row of values")]
    NoValues,

    /// UPDATE (or upsert DO UPDATE) rendered without any assignments
    #[error("UPDATE requires at least one assignment")]
    NoAssignments,

    /// UNION rendered without any members
    #[error("UNION requires at least one member")]
    MissingMembers,

    /// Subquery used as a FROM source without an alias
    #[error("subquery sources require an alias")]
    MissingAlias,

    /// Template marker count does not match the supplied argument count
    #[error("template has {markers} placeholder markers but {values} values were supplied")]
    PlaceholderMismatch { markers: usize, values: usize },

    /// VALUES row length does not match the declared column list
    #[error("row has {got} values but {expected} columns were declared")]
    RowLength { expected: usize, got: usize },

    /// A value outside the supported literal kinds (e.g. a nested list)
    #[error("unsupported value type: {0}")]
    UnsupportedType(&'static str),

    /// An empty list value reached the interpolator
    #[error("cannot render an empty list value")]
    EmptyList,

    /// Requested feature is not available on the active dialect
    #[error("{feature} is not supported by the {dialect} dialect")]
    Unsupported {
        dialect: &'static str,
        feature: Feature,
    },

    /// A value cannot be escaped into a safe literal
    #[error("cannot escape value: {0}")]
    Escape(String),
}

impl RenderError {
    /// The category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingFrom
            | Self::MissingTable
            | Self::NoColumns
            | Self::NoValues
            | Self::NoAssignments
            | Self::MissingMembers
            | Self::MissingAlias => ErrorKind::Structural,
            Self::PlaceholderMismatch { .. }
            | Self::RowLength { .. }
            | Self::UnsupportedType(_)
            | Self::EmptyList => ErrorKind::Argument,
            Self::Unsupported { .. } => ErrorKind::Capability,
            Self::Escape(_) => ErrorKind::Escape,
        }
    }

    /// Check if this is a structural error
    pub fn is_structural(&self) -> bool {
        self.kind() == ErrorKind::Structural
    }

    /// Check if this is an argument error
    pub fn is_argument(&self) -> bool {
        self.kind() == ErrorKind::Argument
    }

    /// Check if this is a dialect capability error
    pub fn is_capability(&self) -> bool {
        self.kind() == ErrorKind::Capability
    }

    /// Check if this is an escape error
    pub fn is_escape(&self) -> bool {
        self.kind() == ErrorKind::Escape
    }
}
