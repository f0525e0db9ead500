use crate::error::{not_found, ApiError};
use crate::handlers::MessageResponse;
use crate::routes::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use leadbook_core::rules::parse_identifier;
use leadbook_core::{AgentCreateRequest, AgentId, SalesAgent};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Serialize)]
pub struct AgentResponse {
    pub message: &'static str,
    pub agent: SalesAgent,
}

pub async fn list_agents(
    State(state): State<AppState>,
) -> Result<Json<Vec<SalesAgent>>, ApiError> {
    let agents = state.db.call(|store| store.agents().list()).await?;
    if agents.is_empty() {
        return Err(not_found("no sales agents found"));
    }
    Ok(Json(agents))
}

pub async fn create_agent(
    State(state): State<AppState>,
    payload: Result<Json<AgentCreateRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AgentResponse>), ApiError> {
    let Json(request) = payload?;
    let input = request.validate()?;
    let now = state.now();
    let agent = state
        .db
        .call(move |store| store.agents().create(now, input))
        .await?;
    info!(agent = %agent.id, "sales agent created");
    Ok((
        StatusCode::CREATED,
        Json(AgentResponse {
            message: "sales agent created",
            agent,
        }),
    ))
}

pub async fn delete_agent(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id: AgentId = parse_identifier("id", &raw_id)?;
    state.db.call(move |store| store.agents().delete(id)).await?;
    info!(agent = %id, "sales agent deleted");
    Ok(Json(MessageResponse {
        message: "sales agent deleted",
    }))
}
