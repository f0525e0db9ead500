use crate::error::{not_found, ApiError};
use crate::routes::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use leadbook_core::rules::parse_identifier;
use leadbook_core::{Comment, CommentCreateRequest, LeadId};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub message: &'static str,
    pub comment: Comment,
}

pub async fn create_comment(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<CommentCreateRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CommentResponse>), ApiError> {
    let lead: LeadId = parse_identifier("id", &raw_id)?;
    let Json(request) = payload?;
    let input = request.validate(lead)?;
    let now = state.now();
    let comment = state
        .db
        .call(move |store| store.comments().create(now, input))
        .await?;
    info!(comment = %comment.id, lead = %lead, "comment added");
    Ok((
        StatusCode::CREATED,
        Json(CommentResponse {
            message: "comment added",
            comment,
        }),
    ))
}

pub async fn list_comments(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let lead: LeadId = parse_identifier("id", &raw_id)?;
    let comments = state
        .db
        .call(move |store| {
            if !store.leads().exists(lead)? {
                return Ok(None);
            }
            store.comments().list_for_lead(lead).map(Some)
        })
        .await?;

    match comments {
        None => Err(not_found(format!("lead {lead} not found"))),
        Some(comments) if comments.is_empty() => {
            Err(not_found(format!("no comments found for lead {lead}")))
        }
        Some(comments) => Ok(Json(comments)),
    }
}
