use async_trait::async_trait;

use spaces_application::FeaturesApi;
use spaces_core::AppResult;
use spaces_domain::KibanaFeature;

/// Fixed feature catalog.
#[derive(Default)]
pub struct InMemoryFeaturesApi {
    features: Vec<KibanaFeature>,
}

impl InMemoryFeaturesApi {
    /// Creates a catalog with the given features.
    #[must_use]
    pub fn new(features: Vec<KibanaFeature>) -> Self {
        Self { features }
    }
}

#[async_trait]
impl FeaturesApi for InMemoryFeaturesApi {
    async fn get_features(&self) -> AppResult<Vec<KibanaFeature>> {
        Ok(self.features.clone())
    }
}
