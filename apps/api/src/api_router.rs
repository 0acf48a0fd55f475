use axum::Router;
use axum::routing::{get, post};
use spaces_core::AppError;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

mod cors;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let space_routes = Router::new()
        .route(
            "/api/spaces/{space_id}/roles/assignable",
            get(handlers::spaces::assignable_roles_handler),
        )
        .route(
            "/api/spaces/{space_id}/roles/assign",
            post(handlers::spaces::assign_roles_handler),
        )
        .route(
            "/api/spaces/{space_id}/content",
            get(handlers::spaces::space_content_handler),
        );

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(space_routes)
        .layer(cors::build_cors_layer(frontend_url)?)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state))
}
