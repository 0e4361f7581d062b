//! Admin read-only views

use std::sync::Arc;

use axum::extract::State;

use crate::stats::{aggregate_stats, AdminStats};

use super::super::state::AppState;
use super::super::types::{ok, ApiResult, OrderView};
use super::helpers::order_views;

/// Campus-wide dashboard statistics
#[utoipa::path(
    get,
    path = "/api/v1/admin/stats",
    responses((status = 200, description = "Aggregate statistics", body = AdminStats)),
    tag = "Admin"
)]
pub async fn admin_stats(State(state): State<Arc<AppState>>) -> ApiResult<AdminStats> {
    ok(aggregate_stats(&state.service))
}

/// Last 10 orders across the campus
#[utoipa::path(
    get,
    path = "/api/v1/admin/orders/recent",
    responses((status = 200, description = "Recent orders", body = [OrderView])),
    tag = "Admin"
)]
pub async fn recent_orders(State(state): State<Arc<AppState>>) -> ApiResult<Vec<OrderView>> {
    let orders = state.service.recent_orders();
    ok(order_views(&state.service, orders))
}

/// Every order, for report generation
#[utoipa::path(
    get,
    path = "/api/v1/admin/orders/all",
    responses((status = 200, description = "All orders", body = [OrderView])),
    tag = "Admin"
)]
pub async fn all_orders(State(state): State<Arc<AppState>>) -> ApiResult<Vec<OrderView>> {
    let orders = state.service.all_orders();
    ok(order_views(&state.service, orders))
}
