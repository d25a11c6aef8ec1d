use async_graphql::*;

use crate::errors::{CoreError, CoreErrorKind};

/// Error codes carried in the `code` extension
#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
pub enum ErrorCode {
    /// Resource not found (404-equivalent)
    NotFound,
    /// Unauthorized access (401-equivalent)
    Unauthorized,
    /// Forbidden access (403-equivalent)
    Forbidden,
    /// Validation failed (400-equivalent)
    ValidationFailed,
    /// Upstream service failed or is unreachable
    ServiceError,
    /// Internal server error
    InternalError,
    /// Conflict (409-equivalent)
    Conflict,
    /// Record discriminator matched no concrete type
    UnresolvedType,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::ServiceError => "SERVICE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::UnresolvedType => "UNRESOLVED_TYPE",
        }
    }
}

impl From<CoreErrorKind> for ErrorCode {
    fn from(kind: CoreErrorKind) -> Self {
        match kind {
            CoreErrorKind::NotFound => ErrorCode::NotFound,
            CoreErrorKind::Validation => ErrorCode::ValidationFailed,
            CoreErrorKind::Conflict => ErrorCode::Conflict,
            CoreErrorKind::Forbidden => ErrorCode::Forbidden,
            CoreErrorKind::Unauthorized => ErrorCode::Unauthorized,
            CoreErrorKind::Unavailable => ErrorCode::ServiceError,
            CoreErrorKind::Internal => ErrorCode::InternalError,
            CoreErrorKind::UnresolvedType => ErrorCode::UnresolvedType,
        }
    }
}

/// Structured error builder for consistent error handling
pub struct StructuredError;

impl StructuredError {
    pub fn validation(field: &str, message: impl Into<String>) -> Error {
        Error::new(format!(
            "Validation failed for '{}': {}",
            field,
            message.into()
        ))
        .extend_with(|_, e| {
            e.set("code", ErrorCode::ValidationFailed.as_str());
            e.set("field", field);
        })
    }

    /// Keeps the collaborator's message as is and adds `code` plus any
    /// structured fields.
    pub fn from_core_error(error: CoreError) -> Error {
        let code = ErrorCode::from(error.kind());
        let fields = error.fields().cloned().unwrap_or_default();

        Error::new(error.message()).extend_with(move |_, e| {
            e.set("code", code.as_str());
            for (key, value) in &fields {
                e.set(key.as_str(), value.as_str());
            }
        })
    }
}
