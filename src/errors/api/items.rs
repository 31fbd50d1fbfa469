use crate::errors::internal::InternalError;
use crate::types::dto::common::ErrorResponse;
use poem_openapi::{payload::Json, ApiResponse};
use std::fmt;

/// Item endpoint error types
#[derive(ApiResponse, Debug)]
pub enum ItemError {
    /// No item exists with the requested id
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl ItemError {
    /// Create a NotFound error for the given item id
    pub fn not_found(id: &str) -> Self {
        ItemError::NotFound(Json(ErrorResponse {
            error: "item_not_found".to_string(),
            message: format!("No item found with id {}", id),
            status_code: 404,
        }))
    }

    /// Convert InternalError to ItemError
    ///
    /// This is the explicit conversion point from internal errors to API
    /// errors. Internal error details are logged but not exposed to clients.
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            InternalError::Database(_) => {
                tracing::error!("Storage error in item operation: {}", err);
                Self::internal_server_error()
            }
        }
    }

    fn internal_server_error() -> Self {
        ItemError::InternalError(Json(ErrorResponse {
            error: "internal_error".to_string(),
            message: "An internal error occurred".to_string(),
            status_code: 500,
        }))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            ItemError::NotFound(json) => json.0.message.clone(),
            ItemError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl fmt::Display for ItemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl From<InternalError> for ItemError {
    fn from(err: InternalError) -> Self {
        Self::from_internal_error(err)
    }
}
