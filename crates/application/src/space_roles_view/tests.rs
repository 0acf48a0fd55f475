use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use spaces_core::{AppError, AppResult, SpaceId};
use spaces_domain::{EditorState, KibanaPrivilegeGrant, Role, SpaceDraft};

use crate::{RolesApiClient, RolesApiClientProvider};

use super::{SpaceRolesView, SpaceRolesViewInput};

struct FakeRolesApiClient {
    roles: Vec<Role>,
    fetch_failures_left: Mutex<usize>,
}

#[async_trait]
impl RolesApiClient for FakeRolesApiClient {
    async fn get_roles(&self) -> AppResult<Vec<Role>> {
        let mut fetch_failures_left = self.fetch_failures_left.lock().await;
        if *fetch_failures_left > 0 {
            *fetch_failures_left -= 1;
            return Err(AppError::Internal("roles index is unavailable".to_owned()));
        }

        Ok(self.roles.clone())
    }

    async fn save_role(&self, _role: Role) -> AppResult<()> {
        Ok(())
    }
}

struct FakeRolesApiClientProvider {
    client: Arc<FakeRolesApiClient>,
    failures_left: Mutex<usize>,
    resolve_calls: Mutex<usize>,
}

impl FakeRolesApiClientProvider {
    fn new(failures: usize) -> Self {
        Self::with_fetch_failures(failures, 0)
    }

    fn with_fetch_failures(failures: usize, fetch_failures: usize) -> Self {
        Self {
            client: Arc::new(FakeRolesApiClient {
                roles: roles(),
                fetch_failures_left: Mutex::new(fetch_failures),
            }),
            failures_left: Mutex::new(failures),
            resolve_calls: Mutex::new(0),
        }
    }
}

#[async_trait]
impl RolesApiClientProvider for FakeRolesApiClientProvider {
    async fn resolve(&self) -> AppResult<Arc<dyn RolesApiClient>> {
        *self.resolve_calls.lock().await += 1;
        tokio::task::yield_now().await;

        let mut failures_left = self.failures_left.lock().await;
        if *failures_left > 0 {
            *failures_left -= 1;
            return Err(AppError::Internal("security plugin is not ready".to_owned()));
        }

        Ok(self.client.clone())
    }
}

fn grant(spaces: &[&str], base: &[&str]) -> KibanaPrivilegeGrant {
    KibanaPrivilegeGrant {
        spaces: spaces.iter().map(|space| (*space).to_owned()).collect(),
        base: base.iter().map(|privilege| (*privilege).to_owned()).collect(),
        feature: Default::default(),
    }
}

fn roles() -> Vec<Role> {
    vec![
        Role::new("viewer", vec![grant(&["*"], &["read"])]).unwrap_or_else(|_| unreachable!()),
        Role::new("editor", vec![grant(&["other"], &[])]).unwrap_or_else(|_| unreachable!()),
        Role::new("superuser", Vec::new())
            .unwrap_or_else(|_| unreachable!())
            .reserved(),
    ]
}

fn view(read_only: bool, provider: Arc<FakeRolesApiClientProvider>) -> SpaceRolesView {
    let mut draft = SpaceDraft::new(SpaceId::new("marketing").unwrap_or_else(|_| unreachable!()));
    draft.set_name(Some("Marketing".to_owned()));

    SpaceRolesView::new(
        SpaceRolesViewInput {
            draft,
            features: Vec::new(),
            read_only,
            assigned_roles: Vec::new(),
        },
        provider,
    )
}

#[tokio::test]
async fn open_filters_to_unallocated_roles() {
    let provider = Arc::new(FakeRolesApiClientProvider::new(0));
    let view = view(false, provider);

    let state = view.open().await;

    assert!(matches!(state, Ok(EditorState::Ready)));
    let names: Vec<String> = view
        .unallocated_roles()
        .await
        .iter()
        .map(|role| role.name().to_owned())
        .collect();
    assert_eq!(names, vec!["editor"]);
    let assigned: Vec<String> = view
        .assigned_roles()
        .await
        .iter()
        .map(|role| role.name().to_owned())
        .collect();
    assert_eq!(assigned, vec!["viewer"]);
    assert!(view.can_assign().await);
    assert!(view.can_open_editor());
    assert!(!view.is_read_only());
}

#[tokio::test]
async fn concurrent_opens_resolve_the_client_once() {
    let provider = Arc::new(FakeRolesApiClientProvider::new(0));
    let view = view(false, provider.clone());

    let (first, second) = tokio::join!(view.open(), view.open());

    assert!(first.is_ok());
    assert!(second.is_ok());
    assert!(view.open().await.is_ok());
    assert_eq!(*provider.resolve_calls.lock().await, 1);
}

#[tokio::test]
async fn read_only_view_never_resolves() {
    let provider = Arc::new(FakeRolesApiClientProvider::new(0));
    let view = view(true, provider.clone());

    assert!(matches!(view.open().await, Ok(EditorState::Ready)));
    assert_eq!(*provider.resolve_calls.lock().await, 0);
    assert!(!view.can_assign().await);
    assert!(matches!(
        view.begin_assignment().await,
        Err(AppError::Forbidden(_))
    ));
}

#[tokio::test]
async fn failed_resolution_is_retried_by_begin_assignment() {
    let provider = Arc::new(FakeRolesApiClientProvider::new(1));
    let view = view(false, provider.clone());

    assert!(matches!(view.open().await, Ok(EditorState::Ready)));
    assert!(!view.can_open_editor());
    assert!(view.unallocated_roles().await.is_empty());
    assert!(matches!(view.reload().await, Err(AppError::InvalidState(_))));

    let form = view.begin_assignment().await;

    assert!(form.is_ok());
    let form = form.unwrap_or_else(|_| unreachable!());
    assert_eq!(form.selection().options().len(), 1);
    assert_eq!(form.state(), EditorState::Ready);
    assert!(view.can_open_editor());
    assert_eq!(*provider.resolve_calls.lock().await, 2);
    assert_eq!(view.state().await, EditorState::Ready);
}

#[tokio::test]
async fn begin_assignment_fails_when_resolution_keeps_failing() {
    let provider = Arc::new(FakeRolesApiClientProvider::new(2));
    let view = view(false, provider);

    assert!(view.open().await.is_ok());
    let form = view.begin_assignment().await;

    assert!(matches!(form, Err(AppError::Internal(_))));
    assert!(!view.can_open_editor());
}

#[tokio::test]
async fn reload_refreshes_assignable_roles() {
    let provider = Arc::new(FakeRolesApiClientProvider::new(0));
    let view = view(false, provider);
    assert!(view.open().await.is_ok());

    assert!(matches!(view.reload().await, Ok(1)));
}

#[tokio::test]
async fn reopening_after_failed_fetch_loads_roles() {
    let provider = Arc::new(FakeRolesApiClientProvider::with_fetch_failures(0, 1));
    let view = view(false, provider.clone());

    assert!(matches!(view.open().await, Err(AppError::Internal(_))));
    assert_eq!(view.state().await, EditorState::Ready);
    assert!(view.unallocated_roles().await.is_empty());
    assert!(!view.can_assign().await);

    assert!(matches!(view.open().await, Ok(EditorState::Ready)));
    assert_eq!(view.unallocated_roles().await.len(), 1);
    assert_eq!(*provider.resolve_calls.lock().await, 1);
}

#[tokio::test]
async fn read_only_view_keeps_seeded_assigned_roles() {
    let provider = Arc::new(FakeRolesApiClientProvider::new(0));
    let mut draft = SpaceDraft::new(SpaceId::new("marketing").unwrap_or_else(|_| unreachable!()));
    draft.set_name(Some("Marketing".to_owned()));
    let seeded =
        Role::new("viewer", vec![grant(&["*"], &["read"])]).unwrap_or_else(|_| unreachable!());
    let view = SpaceRolesView::new(
        SpaceRolesViewInput {
            draft,
            features: Vec::new(),
            read_only: true,
            assigned_roles: vec![seeded.clone()],
        },
        provider,
    );

    assert!(view.open().await.is_ok());

    assert!(view.is_read_only());
    assert_eq!(view.assigned_roles().await, vec![seeded]);
}
