use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("This email is already in use!")]
    DuplicateEmail(String),

    #[error("This phone number is already in use!")]
    DuplicatePhone(String),

    #[error("Invalid role name provided: {0}")]
    UnknownRole(String),

    #[error("Only PDF format is allowed for license documents (got '{0}')")]
    UnsupportedFileType(String),

    #[error("No matching roles found: {0}")]
    NoMatchingRoles(String),

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Storage, upload or delivery failure. The inner detail is for logs
    /// only and must never be returned verbatim to the caller.
    #[error("Storage failure: {0}")]
    Storage(String),
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
