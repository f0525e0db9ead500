use crate::error::{not_found, ApiError};
use crate::routes::AppState;
use axum::extract::State;
use axum::Json;
use leadbook_core::{Lead, PipelineSummaryDto, CLOSED_WINDOW_DAYS};

pub async fn closed_last_week(
    State(state): State<AppState>,
) -> Result<Json<Vec<Lead>>, ApiError> {
    let now = state.now();
    let leads = state
        .db
        .call(move |store| store.leads().list_closed_last_week(now))
        .await?;
    if leads.is_empty() {
        return Err(not_found(format!(
            "no leads closed in the last {CLOSED_WINDOW_DAYS} days"
        )));
    }
    Ok(Json(leads))
}

pub async fn pipeline(State(state): State<AppState>) -> Result<Json<PipelineSummaryDto>, ApiError> {
    let total_pipeline_leads = state
        .db
        .call(|store| store.leads().count_pipeline())
        .await?;
    Ok(Json(PipelineSummaryDto {
        total_pipeline_leads,
    }))
}
