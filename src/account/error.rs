//! Account error types.
//!
//! Every failure surfaced by the storefront API maps to a stable numeric
//! code, a name and an HTTP status.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::core_types::{AddressId, CustomerId, IdentifierError};
use crate::criteria::PaginationError;

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    InvalidIdentifier(#[from] IdentifierError),

    #[error("Address {0} is a default address and cannot be deleted")]
    CannotDeleteDefaultAddress(AddressId),

    #[error("Customer is not logged in")]
    Unauthenticated,

    #[error("Invalid username or password")]
    BadCredentials,

    #[error("Address {0} not found")]
    AddressNotFound(AddressId),

    #[error("Customer {0} not found")]
    CustomerNotFound(CustomerId),

    #[error("Email address is already in use")]
    EmailTaken,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AccountError {
    pub fn code(&self) -> i32 {
        match self {
            Self::InvalidParameter(_) => 1001,
            Self::Validation(_) => 1002,
            Self::InvalidIdentifier(_) => 1003,
            Self::CannotDeleteDefaultAddress(_) => 1004,
            Self::Unauthenticated => 2001,
            Self::BadCredentials => 2002,
            Self::AddressNotFound(_) => 4001,
            Self::CustomerNotFound(_) => 4002,
            Self::EmailTaken => 4091,
            Self::Database(_) | Self::Internal(_) => 5000,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::InvalidParameter(_) => "INVALID_PARAMETER",
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::InvalidIdentifier(_) => "INVALID_IDENTIFIER",
            Self::CannotDeleteDefaultAddress(_) => "CANNOT_DELETE_DEFAULT_ADDRESS",
            Self::Unauthenticated => "CUSTOMER_NOT_LOGGED_IN",
            Self::BadCredentials => "BAD_CREDENTIALS",
            Self::AddressNotFound(_) => "ADDRESS_NOT_FOUND",
            Self::CustomerNotFound(_) => "CUSTOMER_NOT_FOUND",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::Database(_) | Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::InvalidParameter(_)
            | Self::Validation(_)
            | Self::InvalidIdentifier(_)
            | Self::CannotDeleteDefaultAddress(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated => StatusCode::FORBIDDEN,
            Self::BadCredentials => StatusCode::UNAUTHORIZED,
            Self::AddressNotFound(_) | Self::CustomerNotFound(_) => StatusCode::NOT_FOUND,
            Self::EmailTaken => StatusCode::CONFLICT,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn internal(err: impl std::fmt::Display) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<PaginationError> for AccountError {
    fn from(e: PaginationError) -> Self {
        Self::InvalidParameter(e.to_string())
    }
}

impl From<validator::ValidationErrors> for AccountError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let reasons: Vec<String> = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                format!("{}: {}", field, reasons.join(", "))
            })
            .collect();
        fields.sort();
        Self::Validation(fields.join("; "))
    }
}

/// JSON response body for errors.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = 2001)]
    pub code: i32,
    #[schema(example = "CUSTOMER_NOT_LOGGED_IN")]
    pub error: &'static str,
    pub message: String,
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        let status = self.http_status();
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };
        let body = ErrorResponse {
            code: self.code(),
            error: self.name(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status() {
        assert_eq!(AccountError::Unauthenticated.http_status(), StatusCode::FORBIDDEN);
        assert_eq!(AccountError::BadCredentials.http_status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AccountError::AddressNotFound(AddressId::new()).http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AccountError::from(IdentifierError("x".into())).http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AccountError::EmailTaken.http_status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_codes_and_names() {
        assert_eq!(AccountError::Unauthenticated.code(), 2001);
        assert_eq!(AccountError::Unauthenticated.name(), "CUSTOMER_NOT_LOGGED_IN");
        assert_eq!(AccountError::internal("boom").code(), 5000);
    }

    #[test]
    fn test_pagination_error_is_invalid_parameter() {
        let err: AccountError = PaginationError::InvalidLimit(0).into();
        assert!(matches!(err, AccountError::InvalidParameter(_)));
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_server_errors_hide_details() {
        let response = AccountError::internal("secret detail").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
