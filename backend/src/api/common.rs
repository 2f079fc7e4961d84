//! Error handling utilities for API responses.
//!
//! Provides structured responses and conversion between service-layer errors
//! and HTTP responses. Includes:
//! - Standard response envelope
//! - ServiceError to HTTP status code mapping
//! - Request body rejection formatting
//!
//! # Response Format
//! All errors return consistent JSON responses containing:
//! - `message`: Human-readable message
//! - `error.error_type`: Machine-readable error category
//! - `error.details`: Optional field-specific validation errors
//!
//! # Error Handling Flow
//! 1. Service layer returns `ServiceError`
//! 2. `service_error_to_http` converts to the HTTP status and JSON body
//! 3. Server-side failures are logged here and answered with a generic message

use crate::errors::ServiceError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Standard API response wrapper for all endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Indicates if the request was successful
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable message
    pub message: String,
    /// Error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetails>,
    /// Request timestamp
    pub timestamp: String,
}

/// Error details for failed requests
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Machine-readable error type identifier
    pub error_type: String,
    /// Field-specific validation errors when applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Field-specific validation error details
#[derive(Debug, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the field with validation error
    pub field: String,
    /// Description of the validation failure
    pub message: String,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Create an error response
    pub fn error(
        message: impl Into<String>,
        error_type: impl Into<String>,
        details: Option<Vec<FieldError>>,
    ) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message: message.into(),
            error: Some(ErrorDetails {
                error_type: error_type.into(),
                details,
            }),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl ApiResponse<()> {
    /// Create a successful response that carries only a message
    pub fn acknowledged(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: message.into(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Serializes an error envelope into the `(StatusCode, String)` handler error shape.
pub fn error_body(
    status: StatusCode,
    message: impl Into<String>,
    error_type: &str,
    details: Option<Vec<FieldError>>,
) -> (StatusCode, String) {
    let error_response = ApiResponse::<()>::error(message, error_type, details);
    let body = serde_json::to_string(&error_response).unwrap_or_else(|_| {
        format!(r#"{{"success":false,"message":"{}"}}"#, error_type)
    });
    (status, body)
}

/// Converts ServiceError to appropriate HTTP response with standard format
pub fn service_error_to_http(error: ServiceError) -> (StatusCode, String) {
    match error {
        ServiceError::Validation { message } => {
            error_body(StatusCode::BAD_REQUEST, message, "validation_error", None)
        }
        ServiceError::DuplicateAccount { .. } => error_body(
            StatusCode::BAD_REQUEST,
            "Email is already taken. Please choose another one.",
            "duplicate_account",
            None,
        ),
        ServiceError::InvalidCredentials => error_body(
            StatusCode::UNAUTHORIZED,
            "Invalid credentials",
            "invalid_credentials",
            None,
        ),
        ServiceError::Persistence { source } => {
            tracing::error!("Persistence error: {:#}", source);
            error_body(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
                "persistence_error",
                None,
            )
        }
        ServiceError::InternalError { message } => {
            tracing::error!("Internal error: {}", message);
            error_body(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
                "internal_error",
                None,
            )
        }
    }
}

/// Formats validator::ValidationErrors into field-specific error details
pub fn validation_errors_to_field_errors(errors: validator::ValidationErrors) -> Vec<FieldError> {
    errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .unwrap_or(&"Invalid value".into())
                    .to_string(),
            })
        })
        .collect()
}

/// Helper to create validation error response
pub fn validation_error_response(errors: validator::ValidationErrors) -> (StatusCode, String) {
    let field_errors = validation_errors_to_field_errors(errors);
    error_body(
        StatusCode::BAD_REQUEST,
        "Validation failed",
        "validation_error",
        Some(field_errors),
    )
}

/// Maps a JSON extractor rejection onto a 400 envelope
pub fn json_rejection_response(rejection: JsonRejection) -> (StatusCode, String) {
    tracing::debug!("Rejected request body: {}", rejection.body_text());
    error_body(
        StatusCode::BAD_REQUEST,
        "Request body must be valid JSON with the required fields",
        "invalid_body",
        None,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn parse(body: &str) -> Value {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_duplicate_account_is_bad_request() {
        let (status, body) = service_error_to_http(ServiceError::duplicate_account("a@x.com"));
        let json = parse(&body);

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["error_type"], "duplicate_account");
    }

    #[test]
    fn test_invalid_credentials_is_unauthorized() {
        let (status, body) = service_error_to_http(ServiceError::InvalidCredentials);
        let json = parse(&body);

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["message"], "Invalid credentials");
    }

    #[test]
    fn test_persistence_error_hides_detail() {
        let (status, body) = service_error_to_http(ServiceError::persistence(anyhow::anyhow!(
            "database is locked at /var/lib/auth.db"
        )));

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.contains("/var/lib/auth.db"));
        assert_eq!(parse(&body)["error"]["error_type"], "persistence_error");
    }

    #[test]
    fn test_acknowledged_has_no_data() {
        let json = serde_json::to_value(ApiResponse::acknowledged("Login successful")).unwrap();

        assert_eq!(json["message"], "Login successful");
        assert_eq!(json["success"], true);
        assert!(json.get("data").is_none());
        assert!(json.get("error").is_none());
    }
}
