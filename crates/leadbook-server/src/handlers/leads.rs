use crate::error::{not_found, ApiError};
use crate::handlers::MessageResponse;
use crate::routes::AppState;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use leadbook_core::rules::parse_identifier;
use leadbook_core::{Lead, LeadCreateRequest, LeadFilterParams, LeadId, LeadUpdateRequest};
use leadbook_store::query::LeadQuery;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Serialize)]
pub struct LeadResponse {
    pub message: &'static str,
    pub lead: Lead,
}

pub async fn list_leads(
    State(state): State<AppState>,
    params: Result<Query<LeadFilterParams>, QueryRejection>,
) -> Result<Json<Vec<Lead>>, ApiError> {
    let Query(params) = params?;
    let filter = params.validate()?;
    let query = LeadQuery::from_filter(&filter);
    let leads = state.db.call(move |store| store.leads().list(&query)).await?;
    if leads.is_empty() {
        return Err(not_found("no leads found"));
    }
    Ok(Json(leads))
}

pub async fn get_lead(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Lead>, ApiError> {
    let id: LeadId = parse_identifier("id", &raw_id)?;
    let lead = state.db.call(move |store| store.leads().get(id)).await?;
    lead.map(Json)
        .ok_or_else(|| not_found(format!("lead {id} not found")))
}

pub async fn create_lead(
    State(state): State<AppState>,
    payload: Result<Json<LeadCreateRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LeadResponse>), ApiError> {
    let Json(request) = payload?;
    let input = request.validate()?;
    let now = state.now();
    let lead = state
        .db
        .call(move |store| store.leads().create(now, input))
        .await?;
    info!(lead = %lead.id, agent = %lead.sales_agent, "lead created");
    Ok((
        StatusCode::CREATED,
        Json(LeadResponse {
            message: "lead created",
            lead,
        }),
    ))
}

pub async fn update_lead(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<LeadUpdateRequest>, JsonRejection>,
) -> Result<Json<LeadResponse>, ApiError> {
    let id: LeadId = parse_identifier("id", &raw_id)?;
    let Json(request) = payload?;
    let patch = request.validate()?;
    let now = state.now();
    let lead = state
        .db
        .call(move |store| store.leads().update(now, id, patch))
        .await?;
    info!(lead = %lead.id, status = %lead.status, "lead updated");
    Ok(Json(LeadResponse {
        message: "lead updated",
        lead,
    }))
}

pub async fn delete_lead(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id: LeadId = parse_identifier("id", &raw_id)?;
    state.db.call(move |store| store.leads().delete(id)).await?;
    info!(lead = %id, "lead deleted");
    Ok(Json(MessageResponse {
        message: "lead deleted",
    }))
}
