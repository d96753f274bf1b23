use thiserror::Error;

/// Validation failures for scroll parameters. Each message names the
/// offending parameter so the HTTP layer can pass it through untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScrollError {
    #[error("limit must be between 1 and 100, got {0}")]
    InvalidLimit(i64),

    #[error("sort_by field '{0}' is not sortable for this domain")]
    InvalidSortField(String),

    #[error("order must be 'asc' or 'desc', got '{0}'")]
    InvalidOrder(String),

    #[error("after_id '{0}' is not a valid document id")]
    InvalidCursor(String),
}
