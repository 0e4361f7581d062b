//! HTTP gateway: routing, shared state, OpenAPI docs

pub mod handlers;
pub mod openapi;
pub mod state;
pub mod types;

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use state::AppState;

/// Build the full application router.
///
/// Routes nest per role; roles map to disjoint operation sets rather than
/// runtime role checks. Identity (student/personnel ids) is request-scoped,
/// carried in paths and bodies, and validated by the service.
pub fn build_router(state: Arc<AppState>) -> Router {
    // Path params share one name per position; the router requires it.
    let student_routes = Router::new()
        .route("/orders", post(handlers::create_order))
        .route("/orders/{id}", get(handlers::student_orders))
        .route("/orders/detail/{id}", get(handlers::order_detail))
        .route("/orders/{id}/rating", post(handlers::rate_order))
        .route("/personnel", get(handlers::list_personnel))
        .route("/catalog", get(handlers::catalog));

    let personnel_routes = Router::new()
        .route("/orders/pending", get(handlers::pending_orders))
        .route("/orders/inprogress/{id}", get(handlers::in_progress_orders))
        .route("/orders/completed/{id}", get(handlers::completed_orders))
        .route("/orders/{id}", get(handlers::personnel_orders))
        .route("/orders/{id}/accept", post(handlers::accept_order))
        .route("/orders/{id}/reject", post(handlers::reject_order))
        .route("/orders/{id}/status", put(handlers::update_status))
        .route("/stats/{id}", get(handlers::personnel_stats));

    let admin_routes = Router::new()
        .route("/stats", get(handlers::admin_stats))
        .route("/orders/recent", get(handlers::recent_orders))
        .route("/orders/all", get(handlers::all_orders));

    Router::new()
        .route("/api/v1/health", get(handlers::health_check))
        .nest("/api/v1/student", student_routes)
        .nest("/api/v1/personnel", personnel_routes)
        .nest("/api/v1/admin", admin_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
}

/// Bind and serve the gateway.
pub async fn run_server(host: &str, port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = build_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {}", addr, e))?;

    tracing::info!("gateway listening on http://{}", addr);
    tracing::info!("api docs at http://{}/docs", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("server error: {}", e))
}
