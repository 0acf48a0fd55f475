//! Spaces API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod dto;
mod error;
mod handlers;
mod state;

use std::sync::Arc;

use spaces_application::SpaceContentService;
use spaces_core::AppError;
use spaces_infrastructure::{HttpFeaturesApi, HttpRolesApiClientProvider, HttpSpacesContentApi};
use tracing::info;

use crate::api_config::{ApiConfig, init_tracing};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;
    let kibana = config.kibana.connect()?;

    let app_state = AppState {
        roles_api_client_provider: Arc::new(HttpRolesApiClientProvider::new(
            config.kibana.clone(),
        )),
        features_api: Arc::new(HttpFeaturesApi::new(kibana.clone())),
        space_content_service: SpaceContentService::new(
            Arc::new(HttpSpacesContentApi::new(kibana)),
            config.server_base_path.clone(),
        ),
        read_only: config.read_only,
    };

    let app = api_router::build_router(app_state, &config.frontend_url)?;
    let address = config.socket_address()?;

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(
        %address,
        kibana_url = %config.kibana.base_url,
        read_only = config.read_only,
        "spaces-api listening"
    );

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}
