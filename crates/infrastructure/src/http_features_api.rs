use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};

use spaces_application::FeaturesApi;
use spaces_core::AppResult;
use spaces_domain::KibanaFeature;

use crate::KibanaHttpClient;

const FEATURES_PATH: &str = "/api/features";

#[derive(Debug, Deserialize)]
struct FeatureCategoryResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct FeatureResponse {
    id: String,
    name: String,
    #[serde(default)]
    category: Option<FeatureCategoryResponse>,
    #[serde(default)]
    privileges: Option<Map<String, Value>>,
    #[serde(default)]
    hidden: bool,
}

impl From<FeatureResponse> for KibanaFeature {
    fn from(value: FeatureResponse) -> Self {
        Self {
            id: value.id,
            name: value.name,
            category: value.category.map(|category| category.id),
            privileges: value
                .privileges
                .map(|privileges| privileges.into_iter().map(|(id, _)| id).collect())
                .unwrap_or_default(),
            hidden: value.hidden,
        }
    }
}

/// Feature catalog read from the features plugin.
pub struct HttpFeaturesApi {
    kibana: KibanaHttpClient,
}

impl HttpFeaturesApi {
    /// Creates an adapter over an existing Kibana connection.
    #[must_use]
    pub fn new(kibana: KibanaHttpClient) -> Self {
        Self { kibana }
    }
}

#[async_trait]
impl FeaturesApi for HttpFeaturesApi {
    async fn get_features(&self) -> AppResult<Vec<KibanaFeature>> {
        let features: Vec<FeatureResponse> = self
            .kibana
            .send_json(self.kibana.get(FEATURES_PATH), "get features")
            .await?;

        Ok(features.into_iter().map(KibanaFeature::from).collect())
    }
}
