use crate::error::{not_found, ApiError};
use crate::routes::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use leadbook_core::{Tag, TagCreateRequest};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Serialize)]
pub struct TagResponse {
    pub message: &'static str,
    pub tag: Tag,
}

pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Vec<Tag>>, ApiError> {
    let tags = state.db.call(|store| store.tags().list()).await?;
    if tags.is_empty() {
        return Err(not_found("no tags found"));
    }
    Ok(Json(tags))
}

pub async fn create_tag(
    State(state): State<AppState>,
    payload: Result<Json<TagCreateRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TagResponse>), ApiError> {
    let Json(request) = payload?;
    let input = request.validate()?;
    let now = state.now();
    let tag = state
        .db
        .call(move |store| store.tags().create(now, input))
        .await?;
    info!(tag = %tag.id, name = %tag.name, "tag created");
    Ok((
        StatusCode::CREATED,
        Json(TagResponse {
            message: "tag created",
            tag,
        }),
    ))
}
