use sqlx::error::ErrorKind;
use thiserror::Error;

/// Errors surfaced by the invoice repositories.
///
/// Lookups by id report absence as `Ok(None)`, never as an error.
#[derive(Debug, Error)]
pub enum DaoError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Persistence error: {0}")]
    Persistence(#[from] sqlx::Error),
    #[error("Corrupt value in column {column}: {value:?}")]
    CorruptRow { column: &'static str, value: String },
}

impl DaoError {
    /// True when the storage layer rejected a write because of a unique or
    /// foreign-key constraint.
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            DaoError::Persistence(sqlx::Error::Database(db)) => matches!(
                db.kind(),
                ErrorKind::UniqueViolation | ErrorKind::ForeignKeyViolation
            ),
            _ => false,
        }
    }

    pub(crate) fn corrupt(column: &'static str, value: impl Into<String>) -> Self {
        DaoError::CorruptRow {
            column,
            value: value.into(),
        }
    }
}

pub type DaoResult<T> = Result<T, DaoError>;
