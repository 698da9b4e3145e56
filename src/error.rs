use thiserror::Error;

/// Main error type for kgserve
#[derive(Error, Debug)]
pub enum KgserveError {
    /// Malformed caller input; names the offending field
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// The graph store rejected a query (bad statement, schema mismatch)
    #[error("Graph store query error: {0}")]
    Adapter(String),

    /// The graph store is unreachable or refused the connection
    #[error("Graph store unavailable: {0}")]
    StoreUnavailable(String),

    /// A specific node lookup found nothing
    #[error("Node not found: {0}")]
    NotFound(String),

    /// Exploration exceeded its deadline
    #[error("Exploration timed out")]
    Timeout,

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl KgserveError {
    /// Shorthand for a validation error on a named field.
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        KgserveError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Convenient Result type using KgserveError
pub type Result<T> = std::result::Result<T, KgserveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display_names_field() {
        let err = KgserveError::validation("depth", "must be between 1 and 10");
        assert!(err.to_string().contains("depth"));
        assert!(err.to_string().contains("between 1 and 10"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: KgserveError = io_err.into();
        assert!(matches!(err, KgserveError::Io(_)));
    }

    #[test]
    fn test_store_errors_distinguishable() {
        let down = KgserveError::StoreUnavailable("connection refused".to_string());
        let bad = KgserveError::Adapter("syntax error near GO".to_string());
        assert!(down.to_string().contains("unavailable"));
        assert!(bad.to_string().contains("query error"));
    }
}
