use async_trait::async_trait;

use spaces_core::{AppResult, SpaceId};
use spaces_domain::SpaceContentSummary;

/// Remote API reporting saved-object counts per space.
#[async_trait]
pub trait SpacesContentApi: Send + Sync {
    /// Returns the per-type content summary of a space.
    async fn get_content_for_space(&self, space_id: &SpaceId) -> AppResult<SpaceContentSummary>;
}
