use super::*;

pub async fn assignable_roles_handler(
    State(state): State<AppState>,
    Path(space_id): Path<String>,
) -> ApiResult<Json<AssignableRolesResponse>> {
    let view = roles_view(&state, SpaceDraft::new(SpaceId::new(space_id)?)).await?;
    view.open().await?;

    Ok(Json(AssignableRolesResponse {
        read_only: view.is_read_only(),
        can_assign: view.can_assign().await,
        roles: view
            .unallocated_roles()
            .await
            .into_iter()
            .map(RoleResponse::from)
            .collect(),
        assigned_roles: view
            .assigned_roles()
            .await
            .into_iter()
            .map(RoleResponse::from)
            .collect(),
    }))
}

pub async fn assign_roles_handler(
    State(state): State<AppState>,
    Path(space_id): Path<String>,
    Json(payload): Json<AssignRolesRequest>,
) -> ApiResult<(StatusCode, Json<AssignmentReportResponse>)> {
    let level = PrivilegeLevel::from_str(payload.privilege.level.as_str())?;
    let feature_privileges = payload.privilege.features.unwrap_or_default();
    if level != PrivilegeLevel::Custom && !feature_privileges.is_empty() {
        return Err(AppError::Validation(
            "feature privileges require the custom level".to_owned(),
        )
        .into());
    }

    let mut draft = SpaceDraft::new(SpaceId::new(space_id)?);
    draft.set_name(Some(payload.space_name));

    let view = roles_view(&state, draft).await?;
    view.open().await?;
    let mut form = view.begin_assignment().await?;

    form.set_privilege_level(level)?;
    for (feature_id, privileges) in feature_privileges {
        form.apply_feature_table(FeatureTableChange::SetFeaturePrivileges {
            feature_id,
            privileges: privileges.into_iter().collect(),
        })?;
    }

    // The multi-select grows one entry at a time.
    for selected in 1..=payload.role_names.len() {
        form.change_selection(&payload.role_names[..selected])?;
    }

    let privilege_conflict = form.has_privilege_conflict();
    let report = form.save().await?;
    let status = if report.is_complete() {
        StatusCode::OK
    } else {
        StatusCode::MULTI_STATUS
    };

    Ok((
        status,
        Json(AssignmentReportResponse::from_report(
            report,
            privilege_conflict,
        )),
    ))
}

async fn roles_view(state: &AppState, draft: SpaceDraft) -> ApiResult<SpaceRolesView> {
    let features = state.features_api.get_features().await?;

    Ok(SpaceRolesView::new(
        SpaceRolesViewInput {
            draft,
            features,
            read_only: state.read_only,
            assigned_roles: Vec::new(),
        },
        state.roles_api_client_provider.clone(),
    ))
}
