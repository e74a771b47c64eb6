use domain::analysis::Analyzer;
use log::*;
use service::config::Config;
use std::sync::Arc;
use tokio::net::TcpListener;

pub use error::{Error, Result};

mod controller;
mod error;
mod params;
pub mod router;

// Application state shared by every request. Built once at startup and
// read-only afterwards; needs to implement Clone to be passed into Router as State.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub analyzer: Arc<Analyzer>,
}

impl AppState {
    pub fn new(app_config: Config, analyzer: Analyzer) -> Self {
        Self {
            config: app_config,
            analyzer: Arc::new(analyzer),
        }
    }
}

pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let host = app_state.config.interface().to_string();
    let port = app_state.config.port;
    let server_url = format!("{host}:{port}");

    info!(
        "Starting {} server on {server_url} (model provider: {}, allowed origins: {:?})",
        app_state.config.runtime_env(),
        app_state.analyzer.provider_id(),
        app_state.config.allowed_origins,
    );

    let listener = TcpListener::bind(&server_url).await?;
    let router = router::define_routes(app_state);

    axum::serve(listener, router).await
}
