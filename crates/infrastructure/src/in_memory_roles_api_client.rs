use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use spaces_application::{RolesApiClient, RolesApiClientProvider};
use spaces_core::{AppError, AppResult};
use spaces_domain::Role;

/// In-memory roles API keyed by role name.
#[derive(Default)]
pub struct InMemoryRolesApiClient {
    roles: RwLock<BTreeMap<String, Role>>,
    rejected_roles: BTreeSet<String>,
    save_count: RwLock<usize>,
}

impl InMemoryRolesApiClient {
    /// Creates a client seeded with roles.
    #[must_use]
    pub fn new(roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            roles: RwLock::new(
                roles
                    .into_iter()
                    .map(|role| (role.name().to_owned(), role))
                    .collect(),
            ),
            ..Self::default()
        }
    }

    /// Makes saves of the named roles fail.
    #[must_use]
    pub fn with_rejected_roles(mut self, role_names: impl IntoIterator<Item = String>) -> Self {
        self.rejected_roles = role_names.into_iter().collect();
        self
    }

    /// Returns a stored role by name.
    pub async fn find_role(&self, role_name: &str) -> Option<Role> {
        self.roles.read().await.get(role_name).cloned()
    }

    /// Returns how many save calls were received.
    pub async fn save_count(&self) -> usize {
        *self.save_count.read().await
    }
}

#[async_trait]
impl RolesApiClient for InMemoryRolesApiClient {
    async fn get_roles(&self) -> AppResult<Vec<Role>> {
        Ok(self.roles.read().await.values().cloned().collect())
    }

    async fn save_role(&self, role: Role) -> AppResult<()> {
        *self.save_count.write().await += 1;

        if self.rejected_roles.contains(role.name()) {
            return Err(AppError::Conflict(format!(
                "role '{}' was rejected",
                role.name()
            )));
        }

        let existing = self.roles.read().await.get(role.name()).cloned();
        if existing.is_some_and(|existing| existing.is_reserved()) {
            return Err(AppError::Forbidden(format!(
                "role '{}' is reserved",
                role.name()
            )));
        }

        self.roles
            .write()
            .await
            .insert(role.name().to_owned(), role);
        Ok(())
    }
}

/// Provider handing out one shared [`InMemoryRolesApiClient`].
pub struct InMemoryRolesApiClientProvider {
    client: Arc<InMemoryRolesApiClient>,
}

impl InMemoryRolesApiClientProvider {
    /// Creates a provider around an existing client.
    #[must_use]
    pub fn new(client: Arc<InMemoryRolesApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RolesApiClientProvider for InMemoryRolesApiClientProvider {
    async fn resolve(&self) -> AppResult<Arc<dyn RolesApiClient>> {
        Ok(self.client.clone())
    }
}
