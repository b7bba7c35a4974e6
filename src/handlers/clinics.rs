use axum::{
    extract::{Query, State},
    Json,
};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::models::{Analysis, AnalyzeRequest, ClinicsQuery, ClinicsResponse};
use crate::services::format_results;
use crate::state::AppState;

#[instrument(skip(state))]
pub async fn find_clinics(
    State(state): State<AppState>,
    Query(query): Query<ClinicsQuery>,
) -> Result<Json<ClinicsResponse>> {
    let location = query.location.as_deref().unwrap_or_default().trim();
    if location.is_empty() {
        return Err(AppError::BadRequest("Location is required".to_string()));
    }

    let clinics = state
        .analyzer
        .finder()
        .search_clinics_near(location, query.max_results)
        .await;
    let formatted = format_results(&clinics);

    Ok(Json(ClinicsResponse { clinics, formatted }))
}

#[instrument(skip(state, input), fields(clinic = %input.clinic_name, location = %input.location))]
pub async fn analyze(
    State(state): State<AppState>,
    Json(input): Json<AnalyzeRequest>,
) -> Result<Json<Analysis>> {
    let analysis = state.analyzer.analyze(&input).await?;
    Ok(Json(analysis))
}
