//! FreshFold - Laundry Order Management Backend
//!
//! Order lifecycle, pricing, and reporting for a hostel campus, consumed by
//! student, personnel, and admin clients over REST.
//!
//! # Modules
//!
//! - [`models`] - Order, OrderItem, and status types
//! - [`catalog`] - the authoritative item price table
//! - [`pricing`] - pure pricing rule (subtotal × urgency multiplier)
//! - [`lifecycle`] - the forward-only status state machine
//! - [`directory`] - student/personnel registry
//! - [`store`] - in-memory order store with per-order locked mutation
//! - [`service`] - OrderLifecycleService (all operations)
//! - [`stats`] - admin aggregates
//! - [`gateway`] - axum REST gateway
//! - [`config`] / [`logging`] - runtime configuration and tracing init

pub mod catalog;
pub mod config;
pub mod directory;
pub mod error;
pub mod gateway;
pub mod lifecycle;
pub mod logging;
pub mod models;
pub mod pricing;
pub mod service;
pub mod stats;
pub mod store;

// Convenient re-exports at crate root
pub use catalog::Catalog;
pub use directory::{Directory, Personnel, Student};
pub use error::{ServiceError, ServiceResult};
pub use models::{Order, OrderItem, OrderStatus, ServiceType};
pub use service::{DraftItem, OrderDraft, OrderLifecycleService};
pub use stats::{aggregate_stats, AdminStats};
pub use store::OrderStore;
