//! Mutating order handlers (create, accept, reject, advance, rate)

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use super::super::state::AppState;
use super::super::types::{
    created, ok, AcceptOrderRequest, ApiResult, CreateOrderRequest, OrderView, RatingRequest,
    RejectOrderRequest, StatusUpdateRequest,
};
use super::helpers::order_view;

/// Create a laundry order
///
/// POST /api/v1/student/orders
#[utoipa::path(
    post,
    path = "/api/v1/student/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created in PENDING", body = OrderView),
        (status = 400, description = "Invalid parameters"),
        (status = 404, description = "Unknown student or personnel")
    ),
    tag = "Student"
)]
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateOrderRequest>,
) -> ApiResult<OrderView> {
    tracing::debug!(student_id = req.student_id, "create order request");
    let order = state.service.create(req.into())?;
    created(order_view(&state.service, order))
}

/// Accept a pending order
///
/// POST /api/v1/personnel/orders/{order_id}/accept
#[utoipa::path(
    post,
    path = "/api/v1/personnel/orders/{order_id}/accept",
    params(("order_id" = u64, Path, description = "Order id")),
    request_body = AcceptOrderRequest,
    responses(
        (status = 200, description = "Order accepted", body = OrderView),
        (status = 404, description = "Unknown order or personnel"),
        (status = 409, description = "Order not in PENDING")
    ),
    tag = "Personnel"
)]
pub async fn accept_order(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<u64>,
    Json(req): Json<AcceptOrderRequest>,
) -> ApiResult<OrderView> {
    let order = state.service.accept(order_id, req.personnel_id)?;
    ok(order_view(&state.service, order))
}

/// Reject a pending order with a reason
///
/// POST /api/v1/personnel/orders/{order_id}/reject
#[utoipa::path(
    post,
    path = "/api/v1/personnel/orders/{order_id}/reject",
    params(("order_id" = u64, Path, description = "Order id")),
    request_body = RejectOrderRequest,
    responses(
        (status = 200, description = "Order rejected", body = OrderView),
        (status = 400, description = "Empty reason"),
        (status = 404, description = "Unknown order"),
        (status = 409, description = "Order not in PENDING")
    ),
    tag = "Personnel"
)]
pub async fn reject_order(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<u64>,
    Json(req): Json<RejectOrderRequest>,
) -> ApiResult<OrderView> {
    let order = state.service.reject(order_id, &req.reason)?;
    ok(order_view(&state.service, order))
}

/// Advance an order to its next lifecycle stage
///
/// PUT /api/v1/personnel/orders/{order_id}/status
#[utoipa::path(
    put,
    path = "/api/v1/personnel/orders/{order_id}/status",
    params(("order_id" = u64, Path, description = "Order id")),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Status advanced", body = OrderView),
        (status = 404, description = "Unknown order"),
        (status = 409, description = "Transition not legal from current state")
    ),
    tag = "Personnel"
)]
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<u64>,
    Json(req): Json<StatusUpdateRequest>,
) -> ApiResult<OrderView> {
    let order = state.service.advance_status(order_id, req.status)?;
    ok(order_view(&state.service, order))
}

/// Rate a completed order (once, by the ordering student)
///
/// POST /api/v1/student/orders/{order_id}/rating
#[utoipa::path(
    post,
    path = "/api/v1/student/orders/{order_id}/rating",
    params(("order_id" = u64, Path, description = "Order id")),
    request_body = RatingRequest,
    responses(
        (status = 200, description = "Rating recorded", body = OrderView),
        (status = 400, description = "Stars out of range or wrong student"),
        (status = 404, description = "Unknown order"),
        (status = 409, description = "Not DONE yet, or already rated")
    ),
    tag = "Student"
)]
pub async fn rate_order(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<u64>,
    Json(req): Json<RatingRequest>,
) -> ApiResult<OrderView> {
    let order = state.service.rate(order_id, req.student_id, req.rating)?;
    ok(order_view(&state.service, order))
}
