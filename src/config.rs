use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable was not provided.
    #[error("Missing environment variable: {0}")]
    MissingVariable(String),
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Runtime configuration for one importer run.
#[derive(Debug)]
pub struct Config {
    /// Bearer token used to authenticate against the Notion API.
    pub notion_token: String,
    /// Identifier of the Notion database receiving one page per video.
    pub notion_database_id: String,
    /// Base URL of the Notion API.
    pub notion_base_url: String,
    /// Fixed `Category` multi-select tag stamped on every created page.
    pub notion_category_tag: String,
    /// Fixed `Sub Category` multi-select tag stamped on every created page.
    pub notion_subcategory_tag: String,
    /// Base URL of the mediator catalog API.
    pub catalog_base_url: String,
    /// Endpoint returning the catalog bearer token as its response body.
    pub catalog_token_url: String,
    /// Language code segment used in catalog request paths.
    pub catalog_language: String,
    /// Key of the catalog root node whose children form the category list.
    pub catalog_root_key: String,
    /// Maximum number of characters per stored text block.
    pub chunk_max_chars: usize,
    /// Directory receiving one cleaned-caption text file per imported video.
    pub archive_dir: PathBuf,
    /// Directory receiving the per-run failure report, when failures occur.
    pub report_dir: PathBuf,
    /// Timeout applied to every outbound HTTP request, in seconds.
    pub http_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables, performing validation along the way.
    pub fn from_env() -> Result<Self, ConfigError> {
        let chunk_max_chars = load_env_or("CHUNK_MAX_CHARS", "1999")
            .parse::<usize>()
            .map_err(|_| ConfigError::InvalidValue("CHUNK_MAX_CHARS".to_string()))?;
        if chunk_max_chars == 0 {
            return Err(ConfigError::InvalidValue("CHUNK_MAX_CHARS".to_string()));
        }

        Ok(Self {
            notion_token: load_env("NOTION_TOKEN")?,
            notion_database_id: load_env("NOTION_DATABASE_ID")?,
            notion_base_url: load_env_or("NOTION_BASE_URL", "https://api.notion.com"),
            notion_category_tag: load_env_or("NOTION_CATEGORY_TAG", "Broadcasting"),
            notion_subcategory_tag: load_env_or("NOTION_SUBCATEGORY_TAG", "Talk"),
            catalog_base_url: load_env_or(
                "MEDIATOR_BASE_URL",
                "https://b.jw-cdn.org/apis/mediator/v1",
            ),
            catalog_token_url: load_env_or(
                "MEDIATOR_TOKEN_URL",
                "https://b.jw-cdn.org/tokens/jworg.jwt",
            ),
            catalog_language: load_env_or("MEDIATOR_LANGUAGE", "E"),
            catalog_root_key: load_env_or("MEDIATOR_ROOT_CATEGORY", "VideoOnDemand"),
            chunk_max_chars,
            archive_dir: PathBuf::from(load_env_or("SUBTITLE_ARCHIVE_DIR", "subtitles")),
            report_dir: PathBuf::from(load_env_or("ERROR_REPORT_DIR", "error")),
            http_timeout_secs: load_env_or("HTTP_TIMEOUT_SECS", "30")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("HTTP_TIMEOUT_SECS".to_string()))?,
        })
    }
}

fn load_env(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingVariable(key.to_string()))
}

fn load_env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Global configuration cache populated during process start.
pub static CONFIG: OnceLock<Config> = OnceLock::new();

/// Retrieve the loaded configuration, panicking if initialization has not occurred.
pub fn get_config() -> &'static Config {
    CONFIG.get().expect("Config not initialized")
}

/// Load configuration from the environment and install it in the global cache.
pub fn init_config() {
    dotenvy::dotenv().ok();
    let config = Config::from_env().expect("Failed to load config from environment");
    tracing::debug!(
        catalog_url = %config.catalog_base_url,
        language = %config.catalog_language,
        root = %config.catalog_root_key,
        chunk_max_chars = config.chunk_max_chars,
        "Loaded configuration"
    );
    CONFIG.set(config).expect("Failed to set config");
}
