//! Axum router configuration with middleware.
//!
//! All routes are under `/api/`, each reachable with and without the
//! trailing slash. Middleware: CORS, tracing, request body limit.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Route `path` and `path/` to the same handler.
fn both<H, T>(router: Router<AppState>, path: &str, handler: H) -> Router<AppState>
where
    H: axum::handler::Handler<T, AppState>,
    T: 'static,
{
    router
        .route(path, post(handler.clone()))
        .route(&format!("{path}/"), post(handler))
}

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = state.config.server.max_upload_bytes;

    let mut api_routes = Router::new();
    api_routes = both(api_routes, "/chat", handlers::chat::chat);
    api_routes = both(api_routes, "/upload-report", handlers::report::upload_report);
    api_routes = both(api_routes, "/get-hospitals", handlers::hospitals::get_hospitals);
    api_routes = both(api_routes, "/get-news", handlers::news::get_news);
    api_routes = both(api_routes, "/get-outbreaks", handlers::outbreaks::get_outbreaks);
    api_routes = both(api_routes, "/get-content", handlers::content::get_content);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
