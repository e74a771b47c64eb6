use serde::Deserialize;
use utoipa::ToSchema;

/// Request body of `POST /analyze`
///
/// # Fields
///
/// * `text` - The raw meeting transcript to analyze
#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyzeParams {
    pub text: String,
}
