use clap::Parser;
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::env;

use crate::llm::LlmSettings;
use crate::store::StoreSettings;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Disable the request timeout middleware
    #[arg(long, env = "TIMEOUT_DISABLED")]
    pub timeout_disabled: Option<bool>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub resilience: ResilienceConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ResilienceConfig {
    pub timeout_disabled: bool,
}

impl AppConfig {
    /// Load configuration from CLI args, environment, and optional file.
    ///
    /// # Errors
    ///
    /// Returns an error when a source fails to parse or a required key is
    /// missing after layering.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    /// Load configuration from an explicit argument list.
    ///
    /// Priority: CLI flag > environment variable (`AFFINITY_` prefix) >
    /// config file > defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when a source fails to parse or a required key is
    /// missing after layering.
    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let mut builder = Config::builder()
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("resilience.timeout_disabled", false)?;

        if let Some(path) = &cli.config {
            builder = builder.add_source(File::new(path, FileFormat::Yaml));
        }

        // E.g. AFFINITY_SERVER__PORT=8000
        builder = builder.add_source(
            Environment::with_prefix("AFFINITY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", port)?;
        }
        if let Some(td) = cli.timeout_disabled {
            builder = builder.set_override("resilience.timeout_disabled", td)?;
        }

        let cfg = builder.build()?;
        cfg.try_deserialize()
    }
}

/// Load completion-service settings from the environment.
///
/// # Errors
///
/// Returns an error when `LLM_API_KEY` is missing or empty.
pub fn load_completion_settings() -> Result<LlmSettings, String> {
    let api_key = env::var("LLM_API_KEY")
        .map_err(|_| "Missing required env var: LLM_API_KEY".to_string())?;
    if api_key.trim().is_empty() {
        return Err("LLM_API_KEY cannot be empty".to_string());
    }

    let base_url =
        env::var("LLM_BASE_URL").unwrap_or_else(|_| "https://api.openai.com".to_string());
    let model = env::var("LLM_MODEL").unwrap_or_else(|_| "gpt-4".to_string());

    Ok(LlmSettings {
        base_url,
        api_key,
        model,
    })
}

/// Load store-service settings from the environment.
///
/// # Errors
///
/// Returns an error when `STORE_URL` is missing or malformed, or when
/// `STORE_SERVICE_KEY` is missing or empty.
pub fn load_store_settings() -> Result<StoreSettings, String> {
    let base_url =
        env::var("STORE_URL").map_err(|_| "Missing required env var: STORE_URL".to_string())?;
    url::Url::parse(&base_url).map_err(|e| format!("STORE_URL is not a valid URL: {e}"))?;

    let service_key = env::var("STORE_SERVICE_KEY")
        .map_err(|_| "Missing required env var: STORE_SERVICE_KEY".to_string())?;
    if service_key.trim().is_empty() {
        return Err("STORE_SERVICE_KEY cannot be empty".to_string());
    }

    Ok(StoreSettings {
        base_url,
        service_key,
    })
}
