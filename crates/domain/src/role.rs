use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use spaces_core::{AppError, AppResult, SpaceId};

use crate::privilege::{FeatureOverrides, PrivilegeSelection};

/// Space entry that makes a grant apply to every space.
pub const ALL_SPACES: &str = "*";

/// Space-scoped privilege grant attached to a role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KibanaPrivilegeGrant {
    /// Spaces the grant applies to.
    #[serde(default)]
    pub spaces: Vec<String>,
    /// Base privilege names.
    #[serde(default)]
    pub base: Vec<String>,
    /// Feature id to granted feature-level privileges.
    #[serde(default)]
    pub feature: BTreeMap<String, Vec<String>>,
}

impl KibanaPrivilegeGrant {
    /// Creates the grant appended when a role is selected for a space.
    #[must_use]
    pub fn for_space(space_name: &str, selection: &PrivilegeSelection) -> Self {
        Self {
            spaces: vec![space_name.to_owned()],
            base: selection.base_privileges(),
            feature: BTreeMap::new(),
        }
    }

    /// True when the grant lists the space or the wildcard.
    #[must_use]
    pub fn covers_space(&self, space_id: &SpaceId) -> bool {
        self.spaces
            .iter()
            .any(|space| space == space_id.as_str() || space == ALL_SPACES)
    }

    /// Replaces the feature mapping with the given overrides.
    pub fn set_feature_overrides(&mut self, overrides: &FeatureOverrides) {
        self.feature = overrides
            .iter()
            .filter(|(_, privileges)| !privileges.is_empty())
            .map(|(feature_id, privileges)| {
                (feature_id.clone(), privileges.iter().cloned().collect())
            })
            .collect();
    }
}

/// Role metadata as stored by the security plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleMetadata {
    /// Marks system roles that cannot be edited.
    #[serde(
        rename = "_reserved",
        default,
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub reserved: bool,
    /// Remaining metadata keys, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Named bundle of privilege grants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    name: String,
    #[serde(default)]
    metadata: RoleMetadata,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    elasticsearch: Value,
    #[serde(default)]
    kibana: Vec<KibanaPrivilegeGrant>,
}

impl Role {
    /// Creates a role with validated name and the given grants.
    pub fn new(name: impl Into<String>, kibana: Vec<KibanaPrivilegeGrant>) -> AppResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AppError::Validation(
                "role name must not be empty".to_owned(),
            ));
        }

        Ok(Self {
            name,
            metadata: RoleMetadata::default(),
            elasticsearch: Value::Null,
            kibana,
        })
    }

    /// Marks the role as system reserved.
    #[must_use]
    pub fn reserved(mut self) -> Self {
        self.metadata.reserved = true;
        self
    }

    /// Sets the opaque search-engine privileges.
    #[must_use]
    pub fn with_elasticsearch(mut self, elasticsearch: Value) -> Self {
        self.elasticsearch = elasticsearch;
        self
    }

    /// Returns the unique role name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the role metadata.
    #[must_use]
    pub fn metadata(&self) -> &RoleMetadata {
        &self.metadata
    }

    /// Returns true for system reserved roles.
    #[must_use]
    pub fn is_reserved(&self) -> bool {
        self.metadata.reserved
    }

    /// Returns the opaque search-engine privileges.
    #[must_use]
    pub fn elasticsearch(&self) -> &Value {
        &self.elasticsearch
    }

    /// Returns the ordered space grants.
    #[must_use]
    pub fn kibana(&self) -> &[KibanaPrivilegeGrant] {
        &self.kibana
    }

    /// True when any grant already covers the space.
    #[must_use]
    pub fn has_access_to_space(&self, space_id: &SpaceId) -> bool {
        self.kibana.iter().any(|grant| grant.covers_space(space_id))
    }

    /// Returns a copy of this role with one more grant.
    #[must_use]
    pub fn with_appended_grant(&self, grant: KibanaPrivilegeGrant) -> Self {
        let mut role = self.clone();
        role.kibana.push(grant);
        role
    }

    pub(crate) fn grant_mut(&mut self, index: usize) -> Option<&mut KibanaPrivilegeGrant> {
        self.kibana.get_mut(index)
    }
}

/// Filters roles that may still be assigned to a space.
///
/// Reserved roles are excluded, as is any role holding a grant for the space
/// itself or for all spaces.
#[must_use]
pub fn assignable_roles(roles: Vec<Role>, space_id: &SpaceId) -> Vec<Role> {
    roles
        .into_iter()
        .filter(|role| !role.is_reserved() && !role.has_access_to_space(space_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use spaces_core::SpaceId;

    use super::{KibanaPrivilegeGrant, Role, assignable_roles};
    use crate::PrivilegeSelection;

    fn space_id(value: &str) -> SpaceId {
        SpaceId::new(value).unwrap_or_else(|_| unreachable!())
    }

    fn grant(spaces: &[&str], base: &[&str]) -> KibanaPrivilegeGrant {
        KibanaPrivilegeGrant {
            spaces: spaces.iter().map(|space| (*space).to_owned()).collect(),
            base: base.iter().map(|privilege| (*privilege).to_owned()).collect(),
            feature: Default::default(),
        }
    }

    fn role(name: &str, grants: Vec<KibanaPrivilegeGrant>) -> Role {
        Role::new(name, grants).unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn wildcard_grant_excludes_role_and_foreign_space_keeps_it() {
        let roles = vec![
            role("viewer", vec![grant(&["*"], &["read"])]),
            role("editor", vec![grant(&["other"], &[])]),
        ];

        let assignable = assignable_roles(roles, &space_id("marketing"));
        let names: Vec<&str> = assignable.iter().map(Role::name).collect();

        assert_eq!(names, vec!["editor"]);
    }

    #[test]
    fn role_granted_to_the_space_is_excluded() {
        let roles = vec![role(
            "analyst",
            vec![grant(&["other"], &["read"]), grant(&["marketing"], &["all"])],
        )];

        assert!(assignable_roles(roles, &space_id("marketing")).is_empty());
    }

    #[test]
    fn reserved_role_and_grantless_role() {
        let roles = vec![
            role("superuser", Vec::new()).reserved(),
            role("blank", Vec::new()),
        ];

        let assignable = assignable_roles(roles, &space_id("marketing"));
        let names: Vec<&str> = assignable.iter().map(Role::name).collect();

        assert_eq!(names, vec!["blank"]);
    }

    #[test]
    fn appended_grant_leaves_original_untouched() {
        let original = role("editor", vec![grant(&["other"], &[])]);
        let updated = original.with_appended_grant(KibanaPrivilegeGrant::for_space(
            "Marketing",
            &PrivilegeSelection::Read,
        ));

        assert_eq!(original.kibana().len(), 1);
        assert_eq!(updated.kibana().len(), 2);
        assert_eq!(updated.kibana()[1].spaces, vec!["Marketing"]);
        assert_eq!(updated.kibana()[1].base, vec!["read"]);
        assert!(updated.kibana()[1].feature.is_empty());
    }

    #[test]
    fn role_payload_keeps_unknown_metadata_and_reserved_flag() {
        let payload = json!({
            "name": "kibana_admin",
            "metadata": { "_reserved": true, "owner": "platform" },
            "elasticsearch": { "cluster": ["monitor"] },
            "kibana": [{ "spaces": ["*"], "base": ["all"], "feature": {} }]
        });

        let parsed = serde_json::from_value::<Role>(payload);
        assert!(parsed.is_ok());
        let parsed = parsed.unwrap_or_else(|_| unreachable!());

        assert!(parsed.is_reserved());
        assert_eq!(parsed.metadata().extra.get("owner"), Some(&json!("platform")));
        assert_eq!(parsed.elasticsearch()["cluster"], json!(["monitor"]));
        assert!(parsed.has_access_to_space(&space_id("anything")));
    }
}
