//! HTTP handlers, grouped by concern

pub mod admin;
pub mod health;
pub mod helpers;
pub mod order;
pub mod query;

pub use admin::{admin_stats, all_orders, recent_orders};
pub use health::{health_check, HealthResponse};
pub use order::{accept_order, create_order, rate_order, reject_order, update_status};
pub use query::{
    catalog, completed_orders, in_progress_orders, list_personnel, order_detail, pending_orders,
    personnel_orders, personnel_stats, student_orders,
};
