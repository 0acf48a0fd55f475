use std::sync::Arc;

use async_trait::async_trait;

use spaces_core::AppResult;
use spaces_domain::{KibanaFeature, Role};

/// Remote roles API used to list and persist roles.
#[async_trait]
pub trait RolesApiClient: Send + Sync {
    /// Lists every role known to the security plugin.
    async fn get_roles(&self) -> AppResult<Vec<Role>>;

    /// Creates or replaces a role.
    async fn save_role(&self, role: Role) -> AppResult<()>;
}

/// Port resolving a [`RolesApiClient`] on demand.
#[async_trait]
pub trait RolesApiClientProvider: Send + Sync {
    /// Resolves a ready-to-use client.
    async fn resolve(&self) -> AppResult<Arc<dyn RolesApiClient>>;
}

/// Remote catalog of registered features.
#[async_trait]
pub trait FeaturesApi: Send + Sync {
    /// Lists every registered feature, hidden ones included.
    async fn get_features(&self) -> AppResult<Vec<KibanaFeature>>;
}
