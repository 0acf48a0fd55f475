use std::sync::Arc;

use spaces_application::{FeaturesApi, RolesApiClientProvider, SpaceContentService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub roles_api_client_provider: Arc<dyn RolesApiClientProvider>,
    pub features_api: Arc<dyn FeaturesApi>,
    pub space_content_service: SpaceContentService,
    pub read_only: bool,
}
