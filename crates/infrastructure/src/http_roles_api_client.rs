use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::info;

use spaces_application::{RolesApiClient, RolesApiClientProvider};
use spaces_core::AppResult;
use spaces_domain::Role;

use crate::{KibanaClientConfig, KibanaHttpClient};

const ROLES_PATH: &str = "/api/security/role";

/// Roles API client backed by the security plugin HTTP routes.
pub struct HttpRolesApiClient {
    kibana: KibanaHttpClient,
}

impl HttpRolesApiClient {
    /// Creates a client over an existing Kibana connection.
    #[must_use]
    pub fn new(kibana: KibanaHttpClient) -> Self {
        Self { kibana }
    }
}

#[async_trait]
impl RolesApiClient for HttpRolesApiClient {
    async fn get_roles(&self) -> AppResult<Vec<Role>> {
        self.kibana
            .send_json(self.kibana.get(ROLES_PATH), "get roles")
            .await
    }

    async fn save_role(&self, role: Role) -> AppResult<()> {
        let path = format!("{ROLES_PATH}/{}", urlencoding::encode(role.name()));
        self.kibana
            .send_empty(self.kibana.put(&path).json(&role_payload(&role)), "save role")
            .await?;

        info!(role_name = role.name(), "saved role");
        Ok(())
    }
}

/// Resolves [`HttpRolesApiClient`] instances from connection settings.
pub struct HttpRolesApiClientProvider {
    config: KibanaClientConfig,
}

impl HttpRolesApiClientProvider {
    /// Creates a provider for the given settings.
    #[must_use]
    pub fn new(config: KibanaClientConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl RolesApiClientProvider for HttpRolesApiClientProvider {
    async fn resolve(&self) -> AppResult<Arc<dyn RolesApiClient>> {
        let kibana = self.config.connect()?;
        Ok(Arc::new(HttpRolesApiClient::new(kibana)))
    }
}

fn role_payload(role: &Role) -> Value {
    let elasticsearch = if role.elasticsearch().is_null() {
        json!({})
    } else {
        role.elasticsearch().clone()
    };

    json!({
        "elasticsearch": elasticsearch,
        "kibana": role.kibana(),
        "metadata": role.metadata(),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use spaces_domain::{KibanaPrivilegeGrant, Role};

    use super::role_payload;

    #[test]
    fn payload_omits_name_and_defaults_elasticsearch() {
        let role = Role::new(
            "editor",
            vec![KibanaPrivilegeGrant {
                spaces: vec!["Marketing".to_owned()],
                base: vec!["read".to_owned()],
                feature: Default::default(),
            }],
        )
        .unwrap_or_else(|_| unreachable!());

        assert_eq!(
            role_payload(&role),
            json!({
                "elasticsearch": {},
                "kibana": [{ "spaces": ["Marketing"], "base": ["read"], "feature": {} }],
                "metadata": {},
            })
        );
    }

    #[test]
    fn payload_keeps_search_privileges() {
        let role = Role::new("ops", Vec::new())
            .unwrap_or_else(|_| unreachable!())
            .with_elasticsearch(json!({ "cluster": ["monitor"] }));

        assert_eq!(role_payload(&role)["elasticsearch"]["cluster"], json!(["monitor"]));
    }
}
