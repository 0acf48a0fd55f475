use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use spaces_core::AppError;

/// Feature id to granted feature-level privileges.
pub type FeatureOverrides = BTreeMap<String, BTreeSet<String>>;

/// Payload-free discriminant of a [`PrivilegeSelection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrivilegeLevel {
    /// Full access to every feature in the space.
    All,
    /// Read-only access to every feature in the space.
    Read,
    /// Per-feature privileges.
    Custom,
}

impl PrivilegeLevel {
    /// Returns a stable transport value for this level.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Read => "read",
            Self::Custom => "custom",
        }
    }
}

impl FromStr for PrivilegeLevel {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "all" => Ok(Self::All),
            "read" => Ok(Self::Read),
            "custom" => Ok(Self::Custom),
            _ => Err(AppError::Validation(format!(
                "unknown privilege level '{value}'"
            ))),
        }
    }
}

/// Privilege chosen in the assignment form.
///
/// The `Custom` variant carries the per-feature overrides edited through the
/// feature table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "level", content = "features", rename_all = "snake_case")]
pub enum PrivilegeSelection {
    /// Base privilege `all`.
    #[default]
    All,
    /// Base privilege `read`.
    Read,
    /// No base privilege, feature overrides instead.
    Custom(FeatureOverrides),
}

impl PrivilegeSelection {
    /// Starts a selection for a level. `Custom` starts without overrides.
    #[must_use]
    pub fn from_level(level: PrivilegeLevel) -> Self {
        match level {
            PrivilegeLevel::All => Self::All,
            PrivilegeLevel::Read => Self::Read,
            PrivilegeLevel::Custom => Self::Custom(FeatureOverrides::new()),
        }
    }

    /// Returns the selection discriminant.
    #[must_use]
    pub fn level(&self) -> PrivilegeLevel {
        match self {
            Self::All => PrivilegeLevel::All,
            Self::Read => PrivilegeLevel::Read,
            Self::Custom(_) => PrivilegeLevel::Custom,
        }
    }

    /// Base privileges written into a new grant.
    #[must_use]
    pub fn base_privileges(&self) -> Vec<String> {
        match self {
            Self::All => vec![PrivilegeLevel::All.as_str().to_owned()],
            Self::Read => vec![PrivilegeLevel::Read.as_str().to_owned()],
            Self::Custom(_) => Vec::new(),
        }
    }

    /// Returns the feature overrides of a custom selection.
    #[must_use]
    pub fn feature_overrides(&self) -> Option<&FeatureOverrides> {
        match self {
            Self::Custom(overrides) => Some(overrides),
            Self::All | Self::Read => None,
        }
    }

    /// True when the feature customization table is shown.
    #[must_use]
    pub fn shows_feature_table(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{FeatureOverrides, PrivilegeLevel, PrivilegeSelection};

    #[test]
    fn custom_selection_has_no_base_privilege() {
        let selection = PrivilegeSelection::from_level(PrivilegeLevel::Custom);
        assert!(selection.base_privileges().is_empty());
        assert!(selection.shows_feature_table());
        assert_eq!(selection.feature_overrides(), Some(&FeatureOverrides::new()));
    }

    #[test]
    fn all_and_read_map_to_base_privilege() {
        assert_eq!(PrivilegeSelection::All.base_privileges(), vec!["all"]);
        assert_eq!(PrivilegeSelection::Read.base_privileges(), vec!["read"]);
        assert!(!PrivilegeSelection::Read.shows_feature_table());
    }

    #[test]
    fn unknown_level_is_rejected() {
        assert!(PrivilegeLevel::from_str("write").is_err());
        assert!(matches!(
            PrivilegeLevel::from_str("custom"),
            Ok(PrivilegeLevel::Custom)
        ));
    }

    #[test]
    fn selection_uses_adjacent_tagging_on_the_wire() {
        let parsed = serde_json::from_str::<PrivilegeSelection>(
            r#"{"level":"custom","features":{"discover":["read"]}}"#,
        );
        let overrides = parsed
            .ok()
            .and_then(|selection| selection.feature_overrides().cloned())
            .unwrap_or_default();
        assert!(overrides.get("discover").is_some_and(|set| set.contains("read")));

        let parsed = serde_json::from_str::<PrivilegeSelection>(r#"{"level":"read"}"#);
        assert!(matches!(parsed, Ok(PrivilegeSelection::Read)));
    }
}
