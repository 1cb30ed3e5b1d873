//! # API Error Type
//!
//! Unified error type for hub commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in AgriConnect Hub                        │
//! │                                                                         │
//! │  Command Function: Result<T, ApiError>                                 │
//! │         │                                                               │
//! │         ├── Role check fails ────── ApiError::forbidden ──────────┐    │
//! │         │                                                          │    │
//! │         ├── Store error? ─── StoreError::NotFound ────────────────┤    │
//! │         │                                                          │    │
//! │         ├── Pricing input? ─── ValidationError (InvalidInput) ────┤    │
//! │         │                                                          ▼    │
//! │         ├── Domain rule? ─── CoreError::InvalidOrderTransition ─ ApiError
//! │         │                                                               │
//! │         └── Success ──────────────────────────────────────────────►    │
//! │                                                                         │
//! │  Frontend receives { "code": "NOT_FOUND", "message": "..." }           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use agri_core::{CoreError, ValidationError};
use agri_store::StoreError;
use serde::Serialize;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "FORBIDDEN",
///   "message": "buyer cannot mark_paid"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// The acting user's role lacks the capability (403)
    Forbidden,

    /// Id or email already taken (409)
    Conflict,

    /// Business rule violated, e.g. an invalid status move (422)
    BusinessLogic,

    /// Cart operation failed
    CartError,

    /// Insufficient stock
    InsufficientStock,

    /// Internal error (500)
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Forbidden, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    pub fn cart(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::CartError, message)
    }
}

/// Converts input validation failures (the pricing engine's InvalidInput).
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::OrderNotFound(id) => ApiError::not_found("Order", &id),
            err @ CoreError::InsufficientStock { .. } => {
                ApiError::new(ErrorCode::InsufficientStock, err.to_string())
            }
            err @ (CoreError::ProductInactive(_) | CoreError::InvalidOrderTransition { .. }) => {
                ApiError::new(ErrorCode::BusinessLogic, err.to_string())
            }
            err @ (CoreError::EmptyOrder | CoreError::CartTooLarge { .. }) => {
                ApiError::cart(err.to_string())
            }
            err @ CoreError::QuantityTooLarge { .. } => ApiError::validation(err.to_string()),
            CoreError::InvalidInput(e) => ApiError::from(e),
        }
    }
}

/// Converts repository errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            StoreError::Duplicate { field, value } => ApiError::new(
                ErrorCode::Conflict,
                format!("{} '{}' already exists", field, value),
            ),
            StoreError::Core(e) => ApiError::from(e),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for commands.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_code_and_message() {
        let err = ApiError::forbidden("buyer cannot mark_paid");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "FORBIDDEN");
        assert_eq!(json["message"], "buyer cannot mark_paid");
    }

    #[test]
    fn test_core_error_mapping() {
        let err = ApiError::from(CoreError::InsufficientStock {
            product: "Tomatoes".to_string(),
            available: 2,
            requested: 5,
        });
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert_eq!(
            err.message,
            "Insufficient stock for Tomatoes: available 2, requested 5"
        );

        let err = ApiError::from(CoreError::EmptyOrder);
        assert_eq!(err.code, ErrorCode::CartError);

        let err = ApiError::from(CoreError::InvalidInput(ValidationError::MustNotBeNegative {
            field: "distance_km".to_string(),
        }));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "distance_km must not be negative");
    }

    #[test]
    fn test_store_error_mapping() {
        let err = ApiError::from(StoreError::not_found("Order", "o-9"));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Order not found: o-9");

        let err = ApiError::from(StoreError::duplicate("email", "a@b.in"));
        assert_eq!(err.code, ErrorCode::Conflict);

        let err = ApiError::from(StoreError::Core(CoreError::ProductInactive("Okra".into())));
        assert_eq!(err.code, ErrorCode::BusinessLogic);
    }
}
