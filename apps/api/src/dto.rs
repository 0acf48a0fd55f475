mod common;
mod spaces;

pub use common::HealthResponse;
pub use spaces::{
    AssignRolesRequest, AssignableRolesResponse, AssignmentReportResponse,
    ContentSummaryRowResponse, PrivilegeGrantResponse, PrivilegeSelectionRequest, RoleResponse,
    RoleSaveFailureResponse,
};
