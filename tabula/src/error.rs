//! Error types
//!
//! The engine degrades silently at runtime (bad pages are clamped, unknown
//! fields never match). Errors only surface where a caller hands over a
//! definition that breaks a contract: column sets, loosely-typed filter
//! clauses and view-mode names.

/// Errors raised while building view definitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    /// Two columns in one set share a key.
    #[error("Column key '{key}' is declared more than once")]
    DuplicateColumn { key: String },

    /// A clause names an operator the filter engine does not know.
    #[error("Filter on '{field}' uses unknown operator '{operator}'")]
    UnknownOperator { field: String, operator: String },

    /// A clause value does not have the shape its operator requires.
    #[error("Filter on '{field}' with operator '{operator}' expects {expected}")]
    InvalidValue {
        field: String,
        operator: &'static str,
        expected: &'static str,
    },

    /// A view mode name that is not one of table, grid, list or custom.
    #[error("Unknown view mode '{0}'")]
    UnknownViewMode(String),
}

impl ViewError {
    /// Creates a duplicate column error.
    pub fn duplicate_column(key: impl Into<String>) -> Self {
        Self::DuplicateColumn { key: key.into() }
    }

    /// Creates an unknown operator error.
    pub fn unknown_operator(field: impl Into<String>, operator: impl Into<String>) -> Self {
        Self::UnknownOperator {
            field: field.into(),
            operator: operator.into(),
        }
    }

    /// Creates an invalid value error.
    pub fn invalid_value(
        field: impl Into<String>,
        operator: &'static str,
        expected: &'static str,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            operator,
            expected,
        }
    }
}
