use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use spaces_application::SpacesContentApi;
use spaces_core::{AppError, AppResult, SpaceId};
use spaces_domain::SpaceContentSummary;

/// In-memory content summaries keyed by space.
#[derive(Default)]
pub struct InMemorySpacesContentApi {
    summaries: RwLock<HashMap<SpaceId, SpaceContentSummary>>,
}

impl InMemorySpacesContentApi {
    /// Creates an adapter without any space.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the summary reported for a space.
    pub async fn set_summary(&self, space_id: SpaceId, summary: SpaceContentSummary) {
        self.summaries.write().await.insert(space_id, summary);
    }
}

#[async_trait]
impl SpacesContentApi for InMemorySpacesContentApi {
    async fn get_content_for_space(&self, space_id: &SpaceId) -> AppResult<SpaceContentSummary> {
        self.summaries
            .read()
            .await
            .get(space_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("space '{space_id}' does not exist")))
    }
}
