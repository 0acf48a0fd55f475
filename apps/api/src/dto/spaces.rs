mod conversions;
mod types;

pub use types::{
    AssignRolesRequest, AssignableRolesResponse, AssignmentReportResponse,
    ContentSummaryRowResponse, PrivilegeGrantResponse, PrivilegeSelectionRequest, RoleResponse,
    RoleSaveFailureResponse,
};
