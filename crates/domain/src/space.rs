use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use spaces_core::{AppResult, NonEmptyString, SpaceId};

/// Persisted space definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    id: SpaceId,
    name: NonEmptyString,
    description: Option<String>,
    disabled_features: BTreeSet<String>,
}

impl Space {
    /// Creates a space with a validated name and no disabled features.
    pub fn new(id: SpaceId, name: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            id,
            name: NonEmptyString::new(name)?,
            description: None,
            disabled_features: BTreeSet::new(),
        })
    }

    /// Sets the optional description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the features hidden in this space.
    #[must_use]
    pub fn with_disabled_features(
        mut self,
        disabled_features: impl IntoIterator<Item = String>,
    ) -> Self {
        self.disabled_features = disabled_features.into_iter().collect();
        self
    }

    /// Returns the space identifier.
    #[must_use]
    pub fn id(&self) -> &SpaceId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the feature ids hidden in this space.
    #[must_use]
    pub fn disabled_features(&self) -> &BTreeSet<String> {
        &self.disabled_features
    }

    /// Starts an editable draft from this space.
    #[must_use]
    pub fn draft(&self) -> SpaceDraft {
        SpaceDraft {
            id: self.id.clone(),
            name: Some(self.name.as_str().to_owned()),
            description: self.description.clone(),
            disabled_features: self.disabled_features.clone(),
        }
    }
}

/// Partially edited space state.
///
/// Unlike [`Space`], the name may be missing or blank while a user edits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceDraft {
    id: SpaceId,
    name: Option<String>,
    description: Option<String>,
    disabled_features: BTreeSet<String>,
}

impl SpaceDraft {
    /// Creates an empty draft for the given space id.
    #[must_use]
    pub fn new(id: SpaceId) -> Self {
        Self {
            id,
            name: None,
            description: None,
            disabled_features: BTreeSet::new(),
        }
    }

    /// Returns the space identifier.
    #[must_use]
    pub fn id(&self) -> &SpaceId {
        &self.id
    }

    /// Returns the name when it is present and not blank.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
    }

    /// Replaces the name.
    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    /// Returns the optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the feature ids hidden in this space.
    #[must_use]
    pub fn disabled_features(&self) -> &BTreeSet<String> {
        &self.disabled_features
    }

    /// Returns true when the feature is hidden in this space.
    #[must_use]
    pub fn is_feature_disabled(&self, feature_id: &str) -> bool {
        self.disabled_features.contains(feature_id)
    }

    /// Shows or hides one feature.
    pub fn set_feature_visibility(&mut self, feature_id: &str, visible: bool) {
        if visible {
            self.disabled_features.remove(feature_id);
        } else {
            self.disabled_features.insert(feature_id.to_owned());
        }
    }

    /// Converts the draft into a persisted space, requiring a name.
    pub fn into_space(self) -> AppResult<Space> {
        let name = NonEmptyString::new(self.name.unwrap_or_default())?;
        Ok(Space {
            id: self.id,
            name,
            description: self.description,
            disabled_features: self.disabled_features,
        })
    }
}
