//! Shared handler utilities

use crate::models::Order;
use crate::service::OrderLifecycleService;

use super::super::types::OrderView;

/// Enrich an order with directory records for the response shape.
pub fn order_view(service: &OrderLifecycleService, order: Order) -> OrderView {
    let student = service.directory().student(order.student_id);
    let personnel = order
        .personnel_id
        .and_then(|id| service.directory().personnel(id));
    OrderView::build(order, student, personnel)
}

pub fn order_views(service: &OrderLifecycleService, orders: Vec<Order>) -> Vec<OrderView> {
    orders
        .into_iter()
        .map(|order| order_view(service, order))
        .collect()
}
