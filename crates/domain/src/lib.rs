//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod content;
mod editor_state;
mod feature;
mod privilege;
mod role;
mod role_selection;
mod space;
mod timeline;

pub use content::{
    ContentSummaryItem, ContentSummaryRow, DEFAULT_CONTENT_ICON, ENTER_SPACE_PATH,
    SpaceContentSummary, add_space_id_to_path, capitalize,
};
pub use editor_state::{EditorEvent, EditorState};
pub use feature::{FeatureTable, FeatureTableChange, FeatureTableOutcome, KibanaFeature};
pub use privilege::{FeatureOverrides, PrivilegeLevel, PrivilegeSelection};
pub use role::{ALL_SPACES, KibanaPrivilegeGrant, Role, RoleMetadata, assignable_roles};
pub use role_selection::{RoleSelection, SelectedRoleOption};
pub use space::{Space, SpaceDraft};
pub use timeline::{TimelineTab, TimelineUrlState};
