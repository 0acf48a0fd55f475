use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use spaces_core::{AppError, AppResult};

use crate::privilege::FeatureOverrides;
use crate::space::SpaceDraft;

/// Pluggable capability area with its own feature-level privileges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KibanaFeature {
    /// Stable feature id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional category used for grouping.
    #[serde(default)]
    pub category: Option<String>,
    /// Feature-level privilege ids this feature exposes.
    #[serde(default)]
    pub privileges: Vec<String>,
    /// Features hidden from management screens.
    #[serde(default)]
    pub hidden: bool,
}

/// One edit reported by the feature table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeatureTableChange {
    /// Shows or hides a feature in the space.
    SetFeatureVisibility {
        /// Target feature id.
        feature_id: String,
        /// Whether the feature is visible.
        visible: bool,
    },
    /// Replaces the privileges granted for a feature. Empty clears the override.
    SetFeaturePrivileges {
        /// Target feature id.
        feature_id: String,
        /// Feature-level privilege ids.
        privileges: BTreeSet<String>,
    },
}

/// New state reported back by the feature table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureTableOutcome {
    /// Replacement space draft.
    pub draft: SpaceDraft,
    /// Replacement feature overrides.
    pub overrides: FeatureOverrides,
}

/// Per-feature customization table.
#[derive(Debug, Clone, Copy)]
pub struct FeatureTable<'a> {
    features: &'a [KibanaFeature],
}

impl<'a> FeatureTable<'a> {
    /// Creates a table over the full feature list.
    #[must_use]
    pub fn new(features: &'a [KibanaFeature]) -> Self {
        Self { features }
    }

    /// Features listed in the table, hidden features excluded.
    pub fn rows(&self) -> impl Iterator<Item = &'a KibanaFeature> + 'a {
        self.features.iter().filter(|feature| !feature.hidden)
    }

    /// Applies one change and reports the resulting draft and overrides.
    pub fn apply(
        &self,
        draft: &SpaceDraft,
        overrides: &FeatureOverrides,
        change: FeatureTableChange,
    ) -> AppResult<FeatureTableOutcome> {
        let mut draft = draft.clone();
        let mut overrides = overrides.clone();

        match change {
            FeatureTableChange::SetFeatureVisibility {
                feature_id,
                visible,
            } => {
                self.find(feature_id.as_str())?;
                draft.set_feature_visibility(feature_id.as_str(), visible);
                if !visible {
                    overrides.remove(feature_id.as_str());
                }
            }
            FeatureTableChange::SetFeaturePrivileges {
                feature_id,
                privileges,
            } => {
                let feature = self.find(feature_id.as_str())?;
                if draft.is_feature_disabled(feature_id.as_str()) {
                    return Err(AppError::Validation(format!(
                        "feature '{feature_id}' is disabled in this space"
                    )));
                }

                if let Some(unknown) = privileges
                    .iter()
                    .find(|privilege| !feature.privileges.contains(*privilege))
                {
                    return Err(AppError::Validation(format!(
                        "feature '{feature_id}' has no privilege '{unknown}'"
                    )));
                }

                if privileges.is_empty() {
                    overrides.remove(feature_id.as_str());
                } else {
                    overrides.insert(feature_id, privileges);
                }
            }
        }

        Ok(FeatureTableOutcome { draft, overrides })
    }

    fn find(&self, feature_id: &str) -> AppResult<&'a KibanaFeature> {
        self.rows()
            .find(|feature| feature.id == feature_id)
            .ok_or_else(|| AppError::Validation(format!("unknown feature '{feature_id}'")))
    }
}
