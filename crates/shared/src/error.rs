//! Application-wide error type used at the HTTP boundary.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Message returned to clients in place of server-side error details.
pub const GENERIC_SERVER_MESSAGE: &str = "An error occurred";

/// Error every domain error is converted into before it reaches a client.
///
/// The variant alone decides the HTTP status and the stable error code; the
/// payload is the human-readable detail.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or rejected credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Referenced record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed or out-of-range input.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Well-formed input the domain refuses, e.g. pricing a category.
    #[error("Not allowed: {0}")]
    BusinessRule(String),

    /// Clash with existing data, e.g. a duplicate item code.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Storage backend failure.
    #[error("Database error: {0}")]
    Database(String),

    /// Anything else that is the server's fault.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status code.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Unauthorized(_) => 401,
            Self::NotFound(_) => 404,
            Self::Conflict(_) => 409,
            Self::BusinessRule(_) => 422,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Stable machine-readable code for the `error` field of responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::BusinessRule(_) => "BUSINESS_RULE_VIOLATION",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the error is the server's fault rather than the caller's.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// Message safe to return to a client. Server errors are masked.
    #[must_use]
    pub fn public_message(&self) -> String {
        if self.is_server_error() {
            GENERIC_SERVER_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_and_code_per_variant() {
        let cases = [
            (AppError::Validation(String::new()), 400, "VALIDATION_ERROR"),
            (AppError::Unauthorized(String::new()), 401, "UNAUTHORIZED"),
            (AppError::NotFound(String::new()), 404, "NOT_FOUND"),
            (AppError::Conflict(String::new()), 409, "CONFLICT"),
            (AppError::BusinessRule(String::new()), 422, "BUSINESS_RULE_VIOLATION"),
            (AppError::Database(String::new()), 500, "DATABASE_ERROR"),
            (AppError::Internal(String::new()), 500, "INTERNAL_ERROR"),
        ];

        for (err, status, code) in cases {
            assert_eq!(err.status_code(), status, "{err:?}");
            assert_eq!(err.error_code(), code, "{err:?}");
        }
    }

    #[test]
    fn test_public_message_hides_server_details() {
        let err = AppError::Database("connection refused on 10.0.0.3".into());
        assert!(err.is_server_error());
        assert_eq!(err.public_message(), GENERIC_SERVER_MESSAGE);

        let err = AppError::Validation("code must not be empty".into());
        assert!(!err.is_server_error());
        assert_eq!(err.public_message(), "Invalid input: code must not be empty");
    }
}
