use thiserror::Error;

/// Failure taxonomy shared by every service operation.
///
/// `Unavailable` carries internal detail for logs only; the HTTP layer never echoes it.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("already exists: {0}")]
    AlreadyExists(String),
    #[error("not liked: {0}")]
    NotLiked(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn unavailable(e: impl std::fmt::Display) -> Self { Self::Unavailable(e.to_string()) }

    /// The human-facing part of the error, without the category prefix.
    pub fn message(&self) -> &str {
        match self {
            ServiceError::Validation(m)
            | ServiceError::Unauthenticated(m)
            | ServiceError::Forbidden(m)
            | ServiceError::NotFound(m)
            | ServiceError::Conflict(m)
            | ServiceError::AlreadyExists(m)
            | ServiceError::NotLiked(m)
            | ServiceError::Unavailable(m) => m,
        }
    }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 1001,
            ServiceError::Unauthenticated(_) => 1002,
            ServiceError::Forbidden(_) => 1003,
            ServiceError::NotFound(_) => 1004,
            ServiceError::Conflict(_) => 1005,
            ServiceError::AlreadyExists(_) => 1006,
            ServiceError::NotLiked(_) => 1007,
            ServiceError::Unavailable(_) => 1200,
        }
    }
}

impl From<models::errors::ModelError> for ServiceError {
    fn from(e: models::errors::ModelError) -> Self {
        match e {
            models::errors::ModelError::Validation(m) => ServiceError::Validation(m),
            models::errors::ModelError::Duplicate(m) => ServiceError::Conflict(m),
            models::errors::ModelError::MissingParent(_) => ServiceError::NotFound("Referenced record not found".into()),
            models::errors::ModelError::Db(m) => ServiceError::Unavailable(m),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::errors::ModelError;

    #[test]
    fn model_errors_map_onto_taxonomy() {
        assert!(matches!(ServiceError::from(ModelError::Validation("x".into())), ServiceError::Validation(_)));
        assert!(matches!(ServiceError::from(ModelError::Duplicate("x".into())), ServiceError::Conflict(_)));
        assert!(matches!(ServiceError::from(ModelError::Db("x".into())), ServiceError::Unavailable(_)));
        let gone = ServiceError::from(ModelError::MissingParent("violates foreign key constraint \"fk_comment_post\"".into()));
        assert!(matches!(&gone, ServiceError::NotFound(m) if !m.contains("fk_comment_post")));
    }

    #[test]
    fn message_strips_category() {
        let e = ServiceError::not_found("Post");
        assert_eq!(e.message(), "Post not found");
        assert_eq!(e.to_string(), "not found: Post not found");
        assert_eq!(e.code(), 1004);
    }
}
