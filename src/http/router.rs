//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let patient_routes = Router::new()
        .route(
            "/patient",
            post(handlers::create_patient).get(handlers::list_patients),
        )
        .route(
            "/patient/{id}",
            get(handlers::get_patient)
                .patch(handlers::update_patient)
                .delete(handlers::delete_patient),
        );

    // The date listing must be registered on its own segment so it cannot
    // shadow the by-id route.
    let consultation_routes = Router::new()
        .route(
            "/consultation",
            post(handlers::create_consultation).get(handlers::list_consultations),
        )
        .route(
            "/consultation/date/{date}",
            get(handlers::list_consultations_by_date),
        )
        .route(
            "/consultation/{id}",
            get(handlers::get_consultation)
                .patch(handlers::update_consultation)
                .delete(handlers::delete_consultation),
        );

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(patient_routes)
        .merge(consultation_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use std::sync::Arc;

    #[test]
    fn test_router_creation() {
        let repo =
            Arc::new(LocalRepository::new()) as Arc<dyn crate::db::repository::FullRepository>;
        let state = AppState::new(repo);
        let _router = create_router(state);
        // If we got here, router was created successfully
    }
}
