use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One space-scoped grant of a role.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/privilege-grant-response.ts"
)]
pub struct PrivilegeGrantResponse {
    pub spaces: Vec<String>,
    pub base: Vec<String>,
    pub feature: BTreeMap<String, Vec<String>>,
}

/// API representation of a role.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-response.ts"
)]
pub struct RoleResponse {
    pub name: String,
    pub reserved: bool,
    pub kibana: Vec<PrivilegeGrantResponse>,
}

/// Roles that may still be granted access to a space, and those that already are.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/assignable-roles-response.ts"
)]
pub struct AssignableRolesResponse {
    pub read_only: bool,
    pub can_assign: bool,
    pub roles: Vec<RoleResponse>,
    pub assigned_roles: Vec<RoleResponse>,
}

/// Privilege chosen for an assignment.
///
/// `features` is only read for the `custom` level.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/privilege-selection-request.ts"
)]
pub struct PrivilegeSelectionRequest {
    pub level: String,
    #[serde(default)]
    pub features: Option<BTreeMap<String, Vec<String>>>,
}

/// Incoming payload for granting a space to roles.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/assign-roles-request.ts"
)]
pub struct AssignRolesRequest {
    pub space_name: String,
    pub role_names: Vec<String>,
    pub privilege: PrivilegeSelectionRequest,
}

/// One role that could not be saved.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-save-failure-response.ts"
)]
pub struct RoleSaveFailureResponse {
    pub role_name: String,
    pub reason: String,
}

/// Per-role outcome of an assignment.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/assignment-report-response.ts"
)]
pub struct AssignmentReportResponse {
    pub saved: Vec<String>,
    pub failed: Vec<RoleSaveFailureResponse>,
    pub privilege_conflict: bool,
}

/// One row of the space content table.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/content-summary-row-response.ts"
)]
pub struct ContentSummaryRowResponse {
    #[serde(rename = "type")]
    pub content_type: String,
    #[ts(type = "number")]
    pub count: u64,
    pub icon: String,
    pub display_name: String,
    pub href: String,
}
