use domain::analysis::Analyzer;
use domain::gateway::anthropic::AnthropicClient;
use log::*;
use service::{config::Config, logging::Logger};
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::new();
    Logger::init_logger(&config);

    info!("Starting up meeting notes analysis service");
    debug!("Loaded configuration: {config:?}");

    // Refuse to start without a model API credential rather than failing every request.
    let client = match AnthropicClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            error!("Unable to initialize the Anthropic client, set CLAUDE_API_KEY: {e}");
            return ExitCode::FAILURE;
        }
    };

    let analyzer = Analyzer::new(Arc::new(client));
    let app_state = web::AppState::new(config, analyzer);

    match web::init_server(app_state).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Server terminated with error: {e}");
            ExitCode::FAILURE
        }
    }
}
