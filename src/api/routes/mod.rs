pub mod chat;
pub mod health;
pub mod session;

use axum::http::{header, Method};
use axum::{middleware, routing::get, routing::post, Router};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::{middleware::request_logger, state::AppState};

pub fn create_router(state: AppState) -> Router {
    let cors = build_cors(&state.config.config.cors.allowed_origins);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest("/api/v1", api_v1_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_logger))
                .layer(CompressionLayer::new())
                .layer(cors),
        )
        .with_state(state)
}

fn build_cors(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        cors.allow_origin(origins)
    }
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .route("/process", post(session::process_page))
        .route("/chat", post(chat::chat_handler))
        .route("/search", post(chat::search_handler))
        .route("/history", get(session::get_history))
        .route("/session", axum::routing::delete(session::reset_session))
}
