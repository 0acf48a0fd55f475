use std::sync::Arc;

use tracing::error;

use spaces_core::{AppResult, SpaceId};
use spaces_domain::ContentSummaryRow;

use crate::SpacesContentApi;

/// Builds the content table of a space.
#[derive(Clone)]
pub struct SpaceContentService {
    api: Arc<dyn SpacesContentApi>,
    server_base_path: String,
}

impl SpaceContentService {
    /// Creates a service linking rows under the given server base path.
    #[must_use]
    pub fn new(api: Arc<dyn SpacesContentApi>, server_base_path: impl Into<String>) -> Self {
        Self {
            api,
            server_base_path: server_base_path.into(),
        }
    }

    /// Returns one row per saved-object type found in the space.
    pub async fn content_summary(&self, space_id: &SpaceId) -> AppResult<Vec<ContentSummaryRow>> {
        let summary = self
            .api
            .get_content_for_space(space_id)
            .await
            .inspect_err(|api_error| {
                error!(
                    space_id = %space_id,
                    error = %api_error,
                    "failed to load space content summary"
                );
            })?;

        summary
            .summary
            .into_iter()
            .map(|item| ContentSummaryRow::from_item(item, &self.server_base_path, space_id))
            .collect()
    }
}
