use async_trait::async_trait;

use spaces_application::SpacesContentApi;
use spaces_core::{AppResult, SpaceId};
use spaces_domain::SpaceContentSummary;

use crate::KibanaHttpClient;

/// Content summary read from the internal spaces route.
pub struct HttpSpacesContentApi {
    kibana: KibanaHttpClient,
}

impl HttpSpacesContentApi {
    /// Creates an adapter over an existing Kibana connection.
    #[must_use]
    pub fn new(kibana: KibanaHttpClient) -> Self {
        Self { kibana }
    }
}

#[async_trait]
impl SpacesContentApi for HttpSpacesContentApi {
    async fn get_content_for_space(&self, space_id: &SpaceId) -> AppResult<SpaceContentSummary> {
        let path = format!("/internal/spaces/{space_id}/content_summary");
        self.kibana
            .send_json(self.kibana.get_internal(&path), "get space content summary")
            .await
    }
}
