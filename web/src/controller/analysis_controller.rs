//! Controller for transcript analysis.

use crate::params::analysis::AnalyzeParams;
use crate::{AppState, Error};

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use domain::error::Error as DomainError;
use domain::AnalysisResult;
use log::*;

/// POST analyze a meeting transcript
///
/// Sends the transcript to the language model and returns the bullet summary,
/// task list and next meeting date extracted from its answer.
#[utoipa::path(
    post,
    path = "/analyze",
    request_body = AnalyzeParams,
    responses(
        (status = 200, description = "Transcript analyzed", body = AnalysisResult),
        (status = 400, description = "Invalid transcript, unusable model output or model API error"),
        (status = 500, description = "Internal Server Error"),
    )
)]
pub async fn analyze(
    State(app_state): State<AppState>,
    params: Result<Json<AnalyzeParams>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let Json(params) = params.map_err(|rejection| {
        debug!("Rejected /analyze body: {rejection}");
        DomainError::invalid_input(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    debug!("POST /analyze with {} bytes of transcript", params.text.len());

    let result = app_state.analyzer.analyze(&params.text).await?;

    Ok((StatusCode::OK, Json(result)))
}
