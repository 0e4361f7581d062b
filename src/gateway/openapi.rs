//! OpenAPI / Swagger UI documentation
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::OpenApi;

use crate::directory::{Personnel, Student};
use crate::gateway::handlers::HealthResponse;
use crate::gateway::types::{
    AcceptOrderRequest, CatalogEntry, CreateOrderRequest, OrderItemRequest, OrderView,
    PersonnelStatsData, RatingRequest, RejectOrderRequest, StatusHistoryEntry,
    StatusUpdateRequest,
};
use crate::models::{Order, OrderItem, OrderStatus, ServiceType};
use crate::stats::{AdminStats, HostelStats, PersonnelStats};

/// Main API documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "FreshFold Order API",
        version = "1.0.0",
        description = "Laundry order lifecycle, pricing, and reporting for a hostel campus.",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health::health_check,
        // Student
        crate::gateway::handlers::order::create_order,
        crate::gateway::handlers::query::student_orders,
        crate::gateway::handlers::query::order_detail,
        crate::gateway::handlers::query::list_personnel,
        crate::gateway::handlers::query::catalog,
        crate::gateway::handlers::order::rate_order,
        // Personnel
        crate::gateway::handlers::query::pending_orders,
        crate::gateway::handlers::query::in_progress_orders,
        crate::gateway::handlers::query::completed_orders,
        crate::gateway::handlers::query::personnel_orders,
        crate::gateway::handlers::order::accept_order,
        crate::gateway::handlers::order::reject_order,
        crate::gateway::handlers::order::update_status,
        crate::gateway::handlers::query::personnel_stats,
        // Admin
        crate::gateway::handlers::admin::admin_stats,
        crate::gateway::handlers::admin::recent_orders,
        crate::gateway::handlers::admin::all_orders,
    ),
    components(
        schemas(
            HealthResponse,
            Order,
            OrderItem,
            OrderStatus,
            ServiceType,
            OrderView,
            StatusHistoryEntry,
            Student,
            Personnel,
            CreateOrderRequest,
            OrderItemRequest,
            AcceptOrderRequest,
            RejectOrderRequest,
            StatusUpdateRequest,
            RatingRequest,
            CatalogEntry,
            PersonnelStatsData,
            AdminStats,
            HostelStats,
            PersonnelStats,
        )
    ),
    tags(
        (name = "System", description = "Liveness"),
        (name = "Student", description = "Order creation, tracking, rating"),
        (name = "Personnel", description = "Queue, acceptance, status advancement"),
        (name = "Admin", description = "Read-only aggregates")
    )
)]
pub struct ApiDoc;
