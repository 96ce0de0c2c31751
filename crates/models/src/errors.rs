use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("duplicate: {0}")]
    Duplicate(String),
    /// Foreign-key violation: the row this one hangs off is gone.
    #[error("missing parent: {0}")]
    MissingParent(String),
    #[error("database error: {0}")]
    Db(String),
}

impl From<sea_orm::DbErr> for ModelError {
    fn from(e: sea_orm::DbErr) -> Self {
        match e.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(msg)) => ModelError::Duplicate(msg),
            Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(msg)) => ModelError::MissingParent(msg),
            _ => ModelError::Db(e.to_string()),
        }
    }
}
