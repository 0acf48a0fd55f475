use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use spaces_application::{SpaceRolesView, SpaceRolesViewInput};
use spaces_core::{AppError, SpaceId};
use spaces_domain::{FeatureTableChange, PrivilegeLevel, SpaceDraft};

use crate::dto::{
    AssignRolesRequest, AssignableRolesResponse, AssignmentReportResponse,
    ContentSummaryRowResponse, RoleResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

mod content;
mod roles;

pub use content::space_content_handler;
pub use roles::{assign_roles_handler, assignable_roles_handler};
