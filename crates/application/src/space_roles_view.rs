use std::sync::Arc;

use tokio::sync::{Mutex, OnceCell, RwLock};
use tracing::{info, warn};

use spaces_core::{AppError, AppResult};
use spaces_domain::{EditorEvent, EditorState, KibanaFeature, Role, SpaceDraft, assignable_roles};

use crate::{RoleAssignmentForm, RolesApiClient, RolesApiClientProvider};

/// Inputs for opening the roles view of one space.
#[derive(Debug, Clone)]
pub struct SpaceRolesViewInput {
    /// Space being edited.
    pub draft: SpaceDraft,
    /// Full feature list, hidden features included.
    pub features: Vec<KibanaFeature>,
    /// Read-only callers never resolve a roles client.
    pub read_only: bool,
    /// Roles already granted access to the space, replaced once roles load.
    pub assigned_roles: Vec<Role>,
}

#[derive(Debug)]
struct LoadedRoles {
    assigned: Vec<Role>,
    unallocated: Vec<Role>,
}

/// Roles tab of a space: lists assigned roles and opens the assignment form.
pub struct SpaceRolesView {
    draft: SpaceDraft,
    features: Vec<KibanaFeature>,
    read_only: bool,
    seeded_assigned_roles: Vec<Role>,
    provider: Arc<dyn RolesApiClientProvider>,
    client: OnceCell<Arc<dyn RolesApiClient>>,
    state: Mutex<EditorState>,
    loaded_roles: RwLock<Option<LoadedRoles>>,
}

impl SpaceRolesView {
    /// Creates an idle view.
    #[must_use]
    pub fn new(input: SpaceRolesViewInput, provider: Arc<dyn RolesApiClientProvider>) -> Self {
        Self {
            draft: input.draft,
            features: input.features,
            read_only: input.read_only,
            seeded_assigned_roles: input.assigned_roles,
            provider,
            client: OnceCell::new(),
            state: Mutex::new(EditorState::Idle),
            loaded_roles: RwLock::new(None),
        }
    }

    /// Opens the view, resolving the roles client and loading assignable roles.
    ///
    /// Repeated or concurrent calls resolve the client once. A resolution
    /// failure leaves the view ready without a client. Reopening after a
    /// failed role fetch fetches again.
    pub async fn open(&self) -> AppResult<EditorState> {
        let mut state = self.state.lock().await;
        if *state != EditorState::Idle {
            let roles_missing = self.loaded_roles.read().await.is_none();
            if roles_missing && let Some(client) = self.client.get() {
                self.load_roles(client.as_ref()).await?;
            }
            return Ok(*state);
        }

        *state = state.transition(EditorEvent::OpenRequested {
            read_only: self.read_only,
        })?;
        if self.read_only {
            return Ok(*state);
        }

        let resolved = self.resolve_client().await;
        let event = match resolved {
            Ok(_) => EditorEvent::ClientResolved,
            Err(_) => EditorEvent::ClientResolutionFailed,
        };
        *state = state.transition(event)?;

        if let Ok(client) = resolved {
            self.load_roles(client.as_ref()).await?;
        }

        Ok(*state)
    }

    /// Reloads assignable roles through the resolved client.
    pub async fn reload(&self) -> AppResult<usize> {
        let Some(client) = self.client.get() else {
            return Err(AppError::InvalidState("roles client has not been resolved".to_owned()));
        };

        self.load_roles(client.as_ref()).await
    }

    /// Returns the view state.
    pub async fn state(&self) -> EditorState {
        *self.state.lock().await
    }

    /// Returns true for read-only callers.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Returns roles already granted access to the space.
    ///
    /// Falls back to the roles the view was opened with until a fetch
    /// succeeds.
    pub async fn assigned_roles(&self) -> Vec<Role> {
        match self.loaded_roles.read().await.as_ref() {
            Some(loaded) => loaded.assigned.clone(),
            None => self.seeded_assigned_roles.clone(),
        }
    }

    /// Returns roles that may still be assigned to the space.
    pub async fn unallocated_roles(&self) -> Vec<Role> {
        self.loaded_roles
            .read()
            .await
            .as_ref()
            .map(|loaded| loaded.unallocated.clone())
            .unwrap_or_default()
    }

    /// True when the caller may start an assignment.
    pub async fn can_assign(&self) -> bool {
        !self.read_only
            && self
                .loaded_roles
                .read()
                .await
                .as_ref()
                .is_some_and(|loaded| !loaded.unallocated.is_empty())
    }

    /// True once a roles client is available to the privilege editor.
    #[must_use]
    pub fn can_open_editor(&self) -> bool {
        self.client.initialized()
    }

    /// Opens the assignment form, retrying client resolution when needed.
    pub async fn begin_assignment(&self) -> AppResult<RoleAssignmentForm> {
        if self.read_only {
            return Err(AppError::Forbidden("read-only users cannot assign roles".to_owned()));
        }

        let client = match self.client.get() {
            Some(client) => Arc::clone(client),
            None => self.retry_resolution().await?,
        };
        let roles_missing = self.loaded_roles.read().await.is_none();
        if roles_missing {
            self.load_roles(client.as_ref()).await?;
        }

        Ok(RoleAssignmentForm::new(
            self.draft.clone(),
            self.features.clone(),
            self.unallocated_roles().await,
            client,
        ))
    }

    async fn retry_resolution(&self) -> AppResult<Arc<dyn RolesApiClient>> {
        let mut state = self.state.lock().await;
        *state = state.transition(EditorEvent::ClientResolutionRequested)?;

        let resolved = self.resolve_client().await;
        let event = match resolved {
            Ok(_) => EditorEvent::ClientResolved,
            Err(_) => EditorEvent::ClientResolutionFailed,
        };
        *state = state.transition(event)?;

        let client = resolved
            .map_err(|error| AppError::Internal(format!("roles client is unavailable: {error}")))?;

        Ok(client)
    }

    async fn resolve_client(&self) -> AppResult<Arc<dyn RolesApiClient>> {
        let resolved = self
            .client
            .get_or_try_init(|| self.provider.resolve())
            .await
            .map(Arc::clone);

        if let Err(error) = &resolved {
            warn!(
                space_id = %self.draft.id(),
                error = %error,
                "failed to resolve roles client"
            );
        }

        resolved
    }

    async fn load_roles(&self, client: &dyn RolesApiClient) -> AppResult<usize> {
        let roles = client.get_roles().await.inspect_err(|error| {
            warn!(
                space_id = %self.draft.id(),
                error = %error,
                "failed to fetch roles"
            );
        })?;

        let assigned = roles
            .iter()
            .filter(|role| role.has_access_to_space(self.draft.id()))
            .cloned()
            .collect::<Vec<_>>();
        let unallocated = assignable_roles(roles, self.draft.id());
        let count = unallocated.len();

        info!(
            space_id = %self.draft.id(),
            assigned_count = assigned.len(),
            assignable_count = count,
            "loaded space roles"
        );

        *self.loaded_roles.write().await = Some(LoadedRoles {
            assigned,
            unallocated,
        });
        Ok(count)
    }
}

#[cfg(test)]
mod tests;
