use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;
use std::fmt;
use std::str::FromStr;

/// Default Anthropic API base URL used when `CLAUDE_BASE_URL` is not set.
pub const DEFAULT_CLAUDE_BASE_URL: &str = "https://api.anthropic.com/v1";

/// Default model used for transcript analysis when `CLAUDE_MODEL` is not set.
pub const DEFAULT_CLAUDE_MODEL: &str = "claude-3-haiku-20240307";

#[derive(Clone, Debug, PartialEq)]
pub enum RustEnv {
    Development,
    Production,
    Staging,
}

#[derive(Debug, PartialEq, Eq)]
pub struct RustEnvParseError;

impl FromStr for RustEnv {
    type Err = RustEnvParseError;
    fn from_str(level: &str) -> Result<RustEnv, Self::Err> {
        match level.to_lowercase().as_str() {
            "development" => Ok(RustEnv::Development),
            "production" => Ok(RustEnv::Production),
            "staging" => Ok(RustEnv::Staging),
            _ => Err(RustEnvParseError),
        }
    }
}

impl fmt::Display for RustEnv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RustEnv::Development => write!(f, "development"),
            RustEnv::Production => write!(f, "production"),
            RustEnv::Staging => write!(f, "staging"),
        }
    }
}

#[derive(Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// A list of full CORS origin URLs that allowed to receive server responses.
    #[arg(
        long,
        env,
        value_delimiter = ',',
        use_value_delimiter = true,
        default_value = "http://localhost:3000,http://localhost:5173"
    )]
    pub allowed_origins: Vec<String>,

    /// The API key to use when calling the Anthropic Messages API. The server
    /// refuses to start without it.
    #[arg(long, env)]
    claude_api_key: Option<String>,

    /// The base URL of the Anthropic API.
    /// Override in tests to point at a mock server.
    #[arg(long, env, default_value = DEFAULT_CLAUDE_BASE_URL)]
    claude_base_url: String,

    /// The model used to analyze meeting transcripts.
    #[arg(long, env, default_value = DEFAULT_CLAUDE_MODEL)]
    claude_model: String,

    /// Maximum number of tokens the model may generate per analysis.
    #[arg(long, env, default_value_t = 1024)]
    pub claude_max_tokens: u32,

    /// The host interface to listen for incoming connections
    #[arg(short, long, env, default_value = "0.0.0.0")]
    pub interface: Option<String>,

    /// The host TCP port to listen for incoming connections
    #[arg(short, long, env, default_value_t = 8000)]
    pub port: u16,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,

    /// Set the Rust runtime environment to use. In development any CORS origin is accepted.
    #[arg(
    short,
    long,
    env,
    default_value_t = RustEnv::Development,
    value_parser = clap::builder::PossibleValuesParser::new([
        "DEVELOPMENT", "PRODUCTION", "STAGING",
        "development", "production", "staging"
    ])
        .map(|s| s.parse::<RustEnv>().unwrap()),
    )]
    pub runtime_env: RustEnv,
}

// Hand-written so the API key never ends up in logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("allowed_origins", &self.allowed_origins)
            .field(
                "claude_api_key",
                &self.claude_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("claude_base_url", &self.claude_base_url)
            .field("claude_model", &self.claude_model)
            .field("claude_max_tokens", &self.claude_max_tokens)
            .field("interface", &self.interface)
            .field("port", &self.port)
            .field("log_level_filter", &self.log_level_filter)
            .field("runtime_env", &self.runtime_env)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    pub fn set_claude_api_key(mut self, api_key: Option<String>) -> Self {
        self.claude_api_key = api_key;
        self
    }

    /// Returns the Anthropic API key, if one is configured and not blank.
    pub fn claude_api_key(&self) -> Option<String> {
        self.claude_api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
    }

    pub fn set_claude_base_url(mut self, base_url: String) -> Self {
        self.claude_base_url = base_url;
        self
    }

    /// Returns the Anthropic API base URL without a trailing slash.
    pub fn claude_base_url(&self) -> &str {
        self.claude_base_url.trim_end_matches('/')
    }

    pub fn claude_model(&self) -> &str {
        &self.claude_model
    }

    pub fn interface(&self) -> &str {
        self.interface.as_deref().unwrap_or("0.0.0.0")
    }

    pub fn runtime_env(&self) -> RustEnv {
        self.runtime_env.clone()
    }

    pub fn is_development(&self) -> bool {
        self.runtime_env() == RustEnv::Development
    }
}
