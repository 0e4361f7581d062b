//! API response types and error codes
//!
//! - `ApiResponse<T>`: unified response wrapper
//! - `ApiError`/`ApiResult`: handler error plumbing, mapped from ServiceError
//! - `error_codes`: stable numeric codes
//! - Order view DTOs (order + directory info + status timeline)

use axum::{http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::directory::{Personnel, Student};
use crate::error::ServiceError;
use crate::models::Order;

// ============================================================================
// Unified API Response Format
// ============================================================================

/// Unified API response wrapper
///
/// All API responses follow this structure:
/// - code: 0 = success, non-zero = error code
/// - msg: short message description
/// - data: actual data (success) or null (error)
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response code: 0 for success, non-zero for errors
    #[schema(example = 0)]
    pub code: i32,
    /// Response message
    #[schema(example = "ok")]
    pub msg: String,
    /// Response data (only present when code == 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: 0,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }

    pub fn error(code: i32, msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

/// 200 OK with a success envelope
pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok((StatusCode::OK, Json(ApiResponse::success(data))))
}

/// 201 Created with a success envelope
pub fn created<T>(data: T) -> ApiResult<T> {
    Ok((StatusCode::CREATED, Json(ApiResponse::success(data))))
}

// ============================================================================
// ApiError
// ============================================================================

/// Handler-level error: HTTP status + envelope code + message
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: i32,
    pub msg: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: i32, msg: impl Into<String>) -> Self {
        Self {
            status,
            code,
            msg: msg.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            error_codes::INVALID_PARAMETER,
            msg,
        )
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            msg,
        )
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        let (status, code) = match &err {
            ServiceError::Validation(_) => {
                (StatusCode::BAD_REQUEST, error_codes::INVALID_PARAMETER)
            }
            ServiceError::InvalidTransition { .. } => {
                (StatusCode::CONFLICT, error_codes::INVALID_TRANSITION)
            }
            ServiceError::NotFound { .. } => (StatusCode::NOT_FOUND, error_codes::NOT_FOUND),
            ServiceError::AlreadyRated(_) => (StatusCode::CONFLICT, error_codes::ALREADY_RATED),
        };
        Self::new(status, code, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = Json(ApiResponse::<()>::error(self.code, self.msg));
        (self.status, body).into_response()
    }
}

pub type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), ApiError>;

// ============================================================================
// Error Codes
// ============================================================================

/// Standard API error codes
pub mod error_codes {
    // Success
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const INVALID_PARAMETER: i32 = 1001;
    pub const INVALID_TRANSITION: i32 = 1002;
    pub const ALREADY_RATED: i32 = 1003;

    // Resource errors (4xxx)
    pub const NOT_FOUND: i32 = 4001;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
}

// ============================================================================
// Response DTOs
// ============================================================================

/// One entry of an order's status timeline.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusHistoryEntry {
    #[schema(example = "WASHING")]
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

/// Order enriched with directory info and the status timeline, the shape
/// all order-returning endpoints respond with.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    #[serde(flatten)]
    pub order: Order,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<Student>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personnel: Option<Personnel>,
    pub status_history: Vec<StatusHistoryEntry>,
}

impl OrderView {
    pub fn build(order: Order, student: Option<Student>, personnel: Option<Personnel>) -> Self {
        let status_history = order
            .status_history()
            .into_iter()
            .map(|(status, timestamp)| StatusHistoryEntry {
                status: status.as_str().to_string(),
                timestamp,
            })
            .collect();
        Self {
            order,
            student,
            personnel,
            status_history,
        }
    }
}

/// Catalog display copy: type + unit price as a string.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    #[schema(example = "Shirt")]
    pub item_type: String,
    #[schema(example = "15")]
    pub unit_price: String,
}

/// Personnel work summary (completed count + earnings).
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonnelStatsData {
    pub completed_orders: u64,
    #[schema(example = "337.50")]
    pub total_earnings: String,
}
