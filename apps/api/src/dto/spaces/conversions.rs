use spaces_application::{AssignmentReport, RoleSaveFailure};
use spaces_domain::{ContentSummaryRow, KibanaPrivilegeGrant, Role};

use super::types::{
    AssignmentReportResponse, ContentSummaryRowResponse, PrivilegeGrantResponse, RoleResponse,
    RoleSaveFailureResponse,
};

impl From<KibanaPrivilegeGrant> for PrivilegeGrantResponse {
    fn from(grant: KibanaPrivilegeGrant) -> Self {
        Self {
            spaces: grant.spaces,
            base: grant.base,
            feature: grant.feature,
        }
    }
}

impl From<Role> for RoleResponse {
    fn from(role: Role) -> Self {
        Self {
            name: role.name().to_owned(),
            reserved: role.is_reserved(),
            kibana: role
                .kibana()
                .iter()
                .cloned()
                .map(PrivilegeGrantResponse::from)
                .collect(),
        }
    }
}

impl From<RoleSaveFailure> for RoleSaveFailureResponse {
    fn from(failure: RoleSaveFailure) -> Self {
        Self {
            role_name: failure.role_name,
            reason: failure.reason,
        }
    }
}

impl AssignmentReportResponse {
    /// Builds the response from a settled save batch.
    #[must_use]
    pub fn from_report(report: AssignmentReport, privilege_conflict: bool) -> Self {
        Self {
            saved: report.saved,
            failed: report
                .failed
                .into_iter()
                .map(RoleSaveFailureResponse::from)
                .collect(),
            privilege_conflict,
        }
    }
}

impl From<ContentSummaryRow> for ContentSummaryRowResponse {
    fn from(row: ContentSummaryRow) -> Self {
        Self {
            content_type: row.content_type().to_owned(),
            count: row.count(),
            icon: row.icon().to_owned(),
            display_name: row.display_name().to_owned(),
            href: row.href().to_owned(),
        }
    }
}
