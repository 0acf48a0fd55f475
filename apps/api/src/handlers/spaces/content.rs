use super::*;

pub async fn space_content_handler(
    State(state): State<AppState>,
    Path(space_id): Path<String>,
) -> ApiResult<Json<Vec<ContentSummaryRowResponse>>> {
    let space_id = SpaceId::new(space_id)?;
    let rows = state
        .space_content_service
        .content_summary(&space_id)
        .await?
        .into_iter()
        .map(ContentSummaryRowResponse::from)
        .collect();

    Ok(Json(rows))
}
