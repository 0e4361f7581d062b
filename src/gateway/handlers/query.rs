//! Read-only projections (student and personnel views)

use std::sync::Arc;

use axum::extract::{Path, Query, State};

use crate::directory::Personnel;

use super::super::state::AppState;
use super::super::types::{
    ok, ApiResult, CatalogEntry, OrderView, PersonnelStatsData, StatusFilterQuery,
};
use super::helpers::{order_view, order_views};

/// A student's orders, newest first
#[utoipa::path(
    get,
    path = "/api/v1/student/orders/{student_id}",
    params(("student_id" = u64, Path, description = "Student id")),
    responses((status = 200, description = "Orders for the student", body = [OrderView])),
    tag = "Student"
)]
pub async fn student_orders(
    State(state): State<Arc<AppState>>,
    Path(student_id): Path<u64>,
) -> ApiResult<Vec<OrderView>> {
    let orders = state.service.list_for_student(student_id);
    ok(order_views(&state.service, orders))
}

/// Single order with directory info and status timeline
#[utoipa::path(
    get,
    path = "/api/v1/student/orders/detail/{order_id}",
    params(("order_id" = u64, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order detail", body = OrderView),
        (status = 404, description = "Unknown order")
    ),
    tag = "Student"
)]
pub async fn order_detail(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<u64>,
) -> ApiResult<OrderView> {
    let order = state.service.order_details(order_id)?;
    ok(order_view(&state.service, order))
}

/// Personnel picker, best-rated first
#[utoipa::path(
    get,
    path = "/api/v1/student/personnel",
    responses((status = 200, description = "All personnel", body = [Personnel])),
    tag = "Student"
)]
pub async fn list_personnel(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Personnel>> {
    ok(state.service.list_personnel())
}

/// Read-only display copy of the item catalog
#[utoipa::path(
    get,
    path = "/api/v1/student/catalog",
    responses((status = 200, description = "Item types and unit prices", body = [CatalogEntry])),
    tag = "Student"
)]
pub async fn catalog(State(state): State<Arc<AppState>>) -> ApiResult<Vec<CatalogEntry>> {
    let entries = state
        .service
        .catalog()
        .entries()
        .map(|(item_type, price)| CatalogEntry {
            item_type: item_type.to_string(),
            unit_price: price.to_string(),
        })
        .collect();
    ok(entries)
}

/// The all-personnel queue of PENDING orders
#[utoipa::path(
    get,
    path = "/api/v1/personnel/orders/pending",
    responses((status = 200, description = "Pending orders", body = [OrderView])),
    tag = "Personnel"
)]
pub async fn pending_orders(State(state): State<Arc<AppState>>) -> ApiResult<Vec<OrderView>> {
    let orders = state.service.pending_orders();
    ok(order_views(&state.service, orders))
}

/// Orders between acceptance and completion for one personnel
#[utoipa::path(
    get,
    path = "/api/v1/personnel/orders/inprogress/{personnel_id}",
    params(("personnel_id" = u64, Path, description = "Personnel id")),
    responses((status = 200, description = "In-progress orders", body = [OrderView])),
    tag = "Personnel"
)]
pub async fn in_progress_orders(
    State(state): State<Arc<AppState>>,
    Path(personnel_id): Path<u64>,
) -> ApiResult<Vec<OrderView>> {
    let orders = state.service.in_progress_orders(personnel_id);
    ok(order_views(&state.service, orders))
}

/// Completed orders for one personnel
#[utoipa::path(
    get,
    path = "/api/v1/personnel/orders/completed/{personnel_id}",
    params(("personnel_id" = u64, Path, description = "Personnel id")),
    responses((status = 200, description = "Completed orders", body = [OrderView])),
    tag = "Personnel"
)]
pub async fn completed_orders(
    State(state): State<Arc<AppState>>,
    Path(personnel_id): Path<u64>,
) -> ApiResult<Vec<OrderView>> {
    let orders = state.service.completed_orders(personnel_id);
    ok(order_views(&state.service, orders))
}

/// A personnel's orders, optionally filtered by status
#[utoipa::path(
    get,
    path = "/api/v1/personnel/orders/{personnel_id}",
    params(
        ("personnel_id" = u64, Path, description = "Personnel id"),
        ("status" = Option<String>, Query, description = "Optional status filter, e.g. WASHING")
    ),
    responses((status = 200, description = "Orders for the personnel", body = [OrderView])),
    tag = "Personnel"
)]
pub async fn personnel_orders(
    State(state): State<Arc<AppState>>,
    Path(personnel_id): Path<u64>,
    Query(filter): Query<StatusFilterQuery>,
) -> ApiResult<Vec<OrderView>> {
    let orders = state.service.list_for_personnel(personnel_id, filter.status);
    ok(order_views(&state.service, orders))
}

/// Completed-order count and earnings for one personnel
#[utoipa::path(
    get,
    path = "/api/v1/personnel/stats/{personnel_id}",
    params(("personnel_id" = u64, Path, description = "Personnel id")),
    responses(
        (status = 200, description = "Work summary", body = PersonnelStatsData),
        (status = 404, description = "Unknown personnel")
    ),
    tag = "Personnel"
)]
pub async fn personnel_stats(
    State(state): State<Arc<AppState>>,
    Path(personnel_id): Path<u64>,
) -> ApiResult<PersonnelStatsData> {
    let stats = state.service.personnel_stats(personnel_id)?;
    ok(PersonnelStatsData {
        completed_orders: stats.completed_orders,
        total_earnings: stats.total_earnings.to_string(),
    })
}
