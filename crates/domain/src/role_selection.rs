use std::collections::BTreeSet;

use spaces_core::{AppError, AppResult};

use crate::privilege::PrivilegeSelection;
use crate::role::{KibanaPrivilegeGrant, Role};
use crate::space::SpaceDraft;

/// Role wrapped for the multi-select, labelled by the role name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedRoleOption {
    label: String,
    role: Role,
    appended_grant: Option<usize>,
}

impl SelectedRoleOption {
    /// Wraps an unselected role.
    #[must_use]
    pub fn new(role: Role) -> Self {
        Self {
            label: role.name().to_owned(),
            role,
            appended_grant: None,
        }
    }

    /// Returns the option label.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Returns the wrapped role.
    #[must_use]
    pub fn role(&self) -> &Role {
        &self.role
    }

    /// Index of the grant appended when this option was selected.
    #[must_use]
    pub fn appended_grant(&self) -> Option<usize> {
        self.appended_grant
    }

    fn with_grant_for(&self, space_name: &str, privilege: &PrivilegeSelection) -> Self {
        let role = self
            .role
            .with_appended_grant(KibanaPrivilegeGrant::for_space(space_name, privilege));
        Self {
            label: self.label.clone(),
            appended_grant: Some(role.kibana().len() - 1),
            role,
        }
    }

    fn existing_base_privileges(&self) -> BTreeSet<&str> {
        self.role
            .kibana()
            .iter()
            .enumerate()
            .filter(|(index, _)| Some(*index) != self.appended_grant)
            .flat_map(|(_, grant)| grant.base.iter().map(String::as_str))
            .collect()
    }
}

/// Multi-select state of the assignment form.
///
/// Options are never mutated. Selecting a role stores a new role value with
/// one extra grant scoped to the draft space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSelection {
    options: Vec<SelectedRoleOption>,
    selected: Vec<SelectedRoleOption>,
}

impl RoleSelection {
    /// Creates an empty selection over the assignable roles.
    #[must_use]
    pub fn new(assignable_roles: Vec<Role>) -> Self {
        Self {
            options: assignable_roles
                .into_iter()
                .map(SelectedRoleOption::new)
                .collect(),
            selected: Vec::new(),
        }
    }

    /// Returns the selectable options.
    #[must_use]
    pub fn options(&self) -> &[SelectedRoleOption] {
        &self.options
    }

    /// Returns the selected options in selection order.
    #[must_use]
    pub fn selected(&self) -> &[SelectedRoleOption] {
        &self.selected
    }

    /// Returns true when nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Applies the multi-select's new value.
    ///
    /// Growth is detected by size alone. When the new value is larger, only
    /// its last entry is treated as newly added and receives a grant for the
    /// draft space. Otherwise the new value replaces the selection as-is.
    pub fn change<S: AsRef<str>>(
        &mut self,
        names: &[S],
        draft: &SpaceDraft,
        privilege: &PrivilegeSelection,
    ) -> AppResult<()> {
        let mut seen = BTreeSet::new();
        for name in names {
            if !seen.insert(name.as_ref()) {
                return Err(AppError::Validation(format!(
                    "role '{}' is selected more than once",
                    name.as_ref()
                )));
            }
        }

        let resolved = names
            .iter()
            .map(|name| self.resolve(name.as_ref()))
            .collect::<AppResult<Vec<_>>>()?;

        if resolved.len() <= self.selected.len() {
            self.selected = resolved;
            return Ok(());
        }

        let space_name = draft.name().ok_or_else(|| {
            AppError::InvalidState("space state requires a name to grant access".to_owned())
        })?;

        let Some(newly_added) = resolved.last() else {
            return Ok(());
        };

        if self
            .selected
            .iter()
            .any(|option| option.label == newly_added.label)
        {
            return Err(AppError::Conflict(format!(
                "role '{}' is already selected",
                newly_added.label
            )));
        }

        let option = newly_added.with_grant_for(space_name, privilege);
        self.selected.push(option);

        Ok(())
    }

    /// True when selected roles carried different base privileges before
    /// this form touched them.
    #[must_use]
    pub fn has_privilege_conflict(&self) -> bool {
        let mut distinct = self
            .selected
            .iter()
            .map(SelectedRoleOption::existing_base_privileges);

        match distinct.next() {
            Some(first) => distinct.any(|other| other != first),
            None => false,
        }
    }

    /// Roles to persist, with custom overrides written into the grants this
    /// form appended without a base privilege.
    #[must_use]
    pub fn roles_for_save(&self, privilege: &PrivilegeSelection) -> Vec<Role> {
        self.selected
            .iter()
            .map(|option| {
                let mut role = option.role.clone();
                if let Some(overrides) = privilege.feature_overrides()
                    && let Some(index) = option.appended_grant
                    && let Some(grant) = role.grant_mut(index)
                    && grant.base.is_empty()
                {
                    grant.set_feature_overrides(overrides);
                }
                role
            })
            .collect()
    }

    /// Keeps only the selected roles whose names are listed.
    pub fn retain(&mut self, role_names: &BTreeSet<String>) {
        self.selected
            .retain(|option| role_names.contains(option.label.as_str()));
    }

    /// Drops the whole selection.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    fn resolve(&self, name: &str) -> AppResult<SelectedRoleOption> {
        self.selected
            .iter()
            .chain(self.options.iter())
            .find(|option| option.label == name)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("role '{name}' is not assignable")))
    }
}
