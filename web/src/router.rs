use crate::controller::{analysis_controller, health_check_controller};
use crate::{params, AppState};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use log::*;
use service::config::Config;
use tower_http::cors::{AllowOrigin, CorsLayer};

use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Meeting Notes Analysis API"
        ),
        paths(
            analysis_controller::analyze,
            health_check_controller::health_check,
        ),
        components(
            schemas(
                domain::AnalysisResult,
                domain::Priority,
                domain::Task,
                health_check_controller::HealthStatus,
                params::analysis::AnalyzeParams,
            )
        ),
        tags(
            (name = "meeting_notes", description = "Meeting transcript analysis API")
        )
    )]
struct ApiDoc;

pub fn define_routes(app_state: AppState) -> Router {
    let cors = cors_layer(&app_state.config);

    Router::new()
        .merge(analysis_routes(app_state))
        .merge(health_routes())
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
        .layer(cors)
}

fn analysis_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/analyze", post(analysis_controller::analyze))
        .with_state(app_state)
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

/// Build the CORS layer from the configured origins.
///
/// Development mode mirrors whatever origin the browser sends.
pub(crate) fn cors_layer(config: &Config) -> CorsLayer {
    let allow_origin = if config.is_development() {
        AllowOrigin::mirror_request()
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| {
                origin
                    .trim()
                    .parse::<HeaderValue>()
                    .inspect_err(|e| warn!("Ignoring invalid CORS origin {origin:?}: {e}"))
                    .ok()
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}
