use crate::config::Config;
use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// HTTP server and client crates whose per-request chatter would drown out the
/// analysis logs. Only shown at `TRACE`.
const HTTP_STACK_MODULES: &[&str] = &[
    "axum", "hyper", "hyper_util", "reqwest", "rustls", "tower", "tower_http",
];

pub struct Logger {}

impl Logger {
    /// Installs the terminal logger at the level chosen by `--log-level-filter`.
    ///
    /// Calling it twice (as tests may) leaves the first logger in place.
    pub fn init_logger(config: &Config) {
        let level = config.log_level_filter;

        if let Err(e) = TermLogger::init(
            level,
            Self::log_config(level),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ) {
            eprintln!("Logger already initialized: {e}");
        }
    }

    fn quiets_http_stack(level: LevelFilter) -> bool {
        level < LevelFilter::Trace
    }

    /// RFC 3339 timestamps, with the HTTP stack muted below `TRACE`.
    fn log_config(level: LevelFilter) -> simplelog::Config {
        let mut builder = ConfigBuilder::new();
        builder.set_time_format_rfc3339();

        if Self::quiets_http_stack(level) {
            for module in HTTP_STACK_MODULES {
                builder.add_filter_ignore_str(module);
            }
        }

        builder.build()
    }
}
