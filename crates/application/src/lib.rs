//! Application services and ports.

#![forbid(unsafe_code)]

mod content_ports;
mod role_assignment_form;
mod roles_ports;
mod space_content_service;
mod space_roles_view;
mod timeline_ports;
mod timeline_url_initializer;

pub use content_ports::SpacesContentApi;
pub use role_assignment_form::{AssignmentReport, RoleAssignmentForm, RoleSaveFailure};
pub use roles_ports::{FeaturesApi, RolesApiClient, RolesApiClientProvider};
pub use space_content_service::SpaceContentService;
pub use space_roles_view::{SpaceRolesView, SpaceRolesViewInput};
pub use timeline_ports::{
    ExperimentalFeatures, QueryTimelineRequest, TimelineLoader, UrlParamRegistry,
};
pub use timeline_url_initializer::{TIMELINE_URL_PARAM_KEY, TimelineUrlParamInitializer};
