use thiserror::Error;

/// Message returned whenever a write would produce two crustaceans with the same name.
pub const DUPLICATE_NAME_MESSAGE: &str = "A crustacean with this name already exists";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Raised both by the service pre-check and by the store's unique index.
    #[error("A crustacean with this name already exists: {0}")]
    DuplicateName(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(id: i32) -> Self {
        DomainError::NotFound {
            entity: "Crustacean",
            field: "id",
            value: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation(vec![message.into()])
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_display_joins_messages() {
        let err = DomainError::Validation(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "Validation failed: a; b");
    }

    #[test]
    fn not_found_names_the_id() {
        assert_eq!(
            DomainError::not_found(7).to_string(),
            "Not found: Crustacean with id=7"
        );
    }
}
