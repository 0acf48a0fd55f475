use std::collections::BTreeSet;
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use spaces_core::{AppError, AppResult};
use spaces_domain::{
    EditorEvent, EditorState, FeatureTable, FeatureTableChange, KibanaFeature, PrivilegeLevel,
    PrivilegeSelection, Role, RoleSelection, SpaceDraft,
};

use crate::RolesApiClient;

/// One role that could not be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSaveFailure {
    /// Role name.
    pub role_name: String,
    /// Error text reported by the roles API.
    pub reason: String,
}

/// Per-role outcome of a save batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentReport {
    /// Roles saved successfully.
    pub saved: Vec<String>,
    /// Roles that failed to save.
    pub failed: Vec<RoleSaveFailure>,
}

impl AssignmentReport {
    /// Returns true when every role saved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

type SaveOutcomes = Vec<(String, AppResult<()>)>;

/// Clears the busy flag when the save batch ends, even if it panics.
struct BusyGuard(Arc<watch::Sender<bool>>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.send_replace(false);
    }
}

/// Editor that grants a space to a selection of roles.
///
/// Issued saves run on their own task. Dropping a pending [`save`] leaves
/// them running; calling `save` again collects their outcomes and `cancel`
/// detaches from them.
///
/// [`save`]: RoleAssignmentForm::save
pub struct RoleAssignmentForm {
    initial_draft: SpaceDraft,
    draft: SpaceDraft,
    features: Vec<KibanaFeature>,
    privilege: PrivilegeSelection,
    selection: RoleSelection,
    client: Arc<dyn RolesApiClient>,
    state: EditorState,
    busy: Arc<watch::Sender<bool>>,
    in_flight: Option<JoinHandle<SaveOutcomes>>,
    last_report: Option<AssignmentReport>,
}

impl RoleAssignmentForm {
    /// Creates a ready form with level `all` and nothing selected.
    #[must_use]
    pub fn new(
        draft: SpaceDraft,
        features: Vec<KibanaFeature>,
        assignable_roles: Vec<Role>,
        client: Arc<dyn RolesApiClient>,
    ) -> Self {
        let (busy, _) = watch::channel(false);
        Self {
            initial_draft: draft.clone(),
            draft,
            features,
            privilege: PrivilegeSelection::default(),
            selection: RoleSelection::new(assignable_roles),
            client,
            state: EditorState::Ready,
            busy: Arc::new(busy),
            in_flight: None,
            last_report: None,
        }
    }

    /// Returns the editor state.
    #[must_use]
    pub fn state(&self) -> EditorState {
        self.state
    }

    /// Returns the local space draft.
    #[must_use]
    pub fn draft(&self) -> &SpaceDraft {
        &self.draft
    }

    /// Returns the current privilege selection.
    #[must_use]
    pub fn privilege(&self) -> &PrivilegeSelection {
        &self.privilege
    }

    /// Returns the role multi-select state.
    #[must_use]
    pub fn selection(&self) -> &RoleSelection {
        &self.selection
    }

    /// Returns the outcome of the last save, if any.
    #[must_use]
    pub fn last_report(&self) -> Option<&AssignmentReport> {
        self.last_report.as_ref()
    }

    /// Subscribes to the busy flag raised while saves are in flight.
    #[must_use]
    pub fn subscribe_busy(&self) -> watch::Receiver<bool> {
        self.busy.subscribe()
    }

    /// Returns true while saves are in flight.
    #[must_use]
    pub fn is_assigning(&self) -> bool {
        *self.busy.borrow()
    }

    /// Applies a new multi-select value given as ordered role names.
    pub fn change_selection<S: AsRef<str>>(&mut self, role_names: &[S]) -> AppResult<()> {
        self.require_ready()?;
        self.selection.change(role_names, &self.draft, &self.privilege)
    }

    /// Changes the privilege level used by future selections.
    pub fn set_privilege_level(&mut self, level: PrivilegeLevel) -> AppResult<()> {
        self.require_ready()?;
        if self.privilege.level() != level {
            self.privilege = PrivilegeSelection::from_level(level);
        }

        Ok(())
    }

    /// Feature rows shown in the customization table, empty unless custom.
    #[must_use]
    pub fn feature_table_rows(&self) -> Vec<&KibanaFeature> {
        if !self.privilege.shows_feature_table() {
            return Vec::new();
        }

        FeatureTable::new(&self.features).rows().collect()
    }

    /// Applies one feature table edit and adopts the reported draft.
    pub fn apply_feature_table(&mut self, change: FeatureTableChange) -> AppResult<()> {
        self.require_ready()?;
        let Some(overrides) = self.privilege.feature_overrides() else {
            return Err(AppError::InvalidState(
                "feature privileges can only be customized with the custom level".to_owned(),
            ));
        };

        let outcome = FeatureTable::new(&self.features).apply(&self.draft, overrides, change)?;
        self.draft = outcome.draft;
        self.privilege = PrivilegeSelection::Custom(outcome.overrides);

        Ok(())
    }

    /// True when the selected roles held different base privileges.
    #[must_use]
    pub fn has_privilege_conflict(&self) -> bool {
        self.selection.has_privilege_conflict()
    }

    /// Saves every selected role concurrently and reports per-role outcomes.
    ///
    /// The form closes only when every role saved. Otherwise it stays ready
    /// with the failed roles still selected. When a previous call was dropped
    /// before its batch settled, this waits for that batch instead of
    /// issuing new saves.
    pub async fn save(&mut self) -> AppResult<AssignmentReport> {
        if self.in_flight.is_none() {
            self.start_save()?;
        }

        let Some(handle) = self.in_flight.as_mut() else {
            return Err(AppError::InvalidState("no save batch is in flight".to_owned()));
        };
        let joined = handle.await;
        self.in_flight = None;

        let outcomes = match joined {
            Ok(outcomes) => outcomes,
            Err(error) => {
                self.state = self.state.transition(EditorEvent::SaveSettled {
                    all_succeeded: false,
                })?;
                return Err(AppError::Internal(format!("role save batch failed: {error}")));
            }
        };

        let report = self.build_report(outcomes);
        self.state = self.state.transition(EditorEvent::SaveSettled {
            all_succeeded: report.is_complete(),
        })?;

        if report.is_complete() {
            self.selection.clear();
        } else {
            let failed: BTreeSet<String> = report
                .failed
                .iter()
                .map(|failure| failure.role_name.clone())
                .collect();
            self.selection.retain(&failed);
        }

        self.last_report = Some(report.clone());
        Ok(report)
    }

    /// Discards local selection and draft edits and closes the form.
    ///
    /// Saves already issued keep running; the form no longer tracks them.
    pub fn cancel(&mut self) -> AppResult<()> {
        self.state = self.state.transition(EditorEvent::Cancelled)?;
        self.in_flight = None;
        self.selection.clear();
        self.privilege = PrivilegeSelection::default();
        self.draft = self.initial_draft.clone();
        self.last_report = None;

        Ok(())
    }

    fn start_save(&mut self) -> AppResult<()> {
        self.require_ready()?;
        if self.selection.is_empty() {
            return Err(AppError::Validation("select at least one role to assign".to_owned()));
        }

        self.state = self.state.transition(EditorEvent::SaveRequested)?;
        self.busy.send_replace(true);

        let busy = BusyGuard(Arc::clone(&self.busy));
        let saves = self
            .selection
            .roles_for_save(&self.privilege)
            .into_iter()
            .map(|role| {
                let client = Arc::clone(&self.client);
                async move {
                    let role_name = role.name().to_owned();
                    let outcome = client.save_role(role).await;
                    (role_name, outcome)
                }
            })
            .collect::<Vec<_>>();

        self.in_flight = Some(tokio::spawn(async move {
            let _busy = busy;
            join_all(saves).await
        }));

        Ok(())
    }

    fn build_report(&self, outcomes: SaveOutcomes) -> AssignmentReport {
        let mut report = AssignmentReport::default();
        for (role_name, outcome) in outcomes {
            match outcome {
                Ok(()) => report.saved.push(role_name),
                Err(error) => {
                    warn!(
                        role_name = %role_name,
                        space_id = %self.draft.id(),
                        error = %error,
                        "failed to save role"
                    );
                    report.failed.push(RoleSaveFailure {
                        role_name,
                        reason: error.to_string(),
                    });
                }
            }
        }

        info!(
            space_id = %self.draft.id(),
            privilege = self.privilege.level().as_str(),
            saved_count = report.saved.len(),
            failed_count = report.failed.len(),
            "role assignment settled"
        );

        report
    }

    fn require_ready(&self) -> AppResult<()> {
        if self.state == EditorState::Ready {
            return Ok(());
        }

        Err(AppError::InvalidState(format!(
            "role assignment form is {}",
            self.state.as_str()
        )))
    }
}
