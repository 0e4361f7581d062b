//! Gateway types module
//!
//! ## Input types
//! - [`CreateOrderRequest`] and friends: request deserialization with
//!   non-empty-string enforcement at the serde layer
//!
//! ## Output types
//! - [`ApiResponse<T>`]: unified response wrapper
//! - [`OrderView`]: order + directory info + status timeline
//!
//! ## Submodules
//! - [`order`]: request types
//! - [`response`]: response envelope, error mapping, DTOs

pub mod order;
pub mod response;

pub use order::{
    AcceptOrderRequest, CreateOrderRequest, OrderItemRequest, RatingRequest, RejectOrderRequest,
    StatusFilterQuery, StatusUpdateRequest,
};
pub use response::{
    created, error_codes, ok, ApiError, ApiResponse, ApiResult, CatalogEntry, OrderView,
    PersonnelStatsData, StatusHistoryEntry,
};
