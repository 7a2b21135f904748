use crate::error::{config_error, env_error, SyncResult};
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Eventbrite REST API root
pub const DEFAULT_API_BASE_URL: &str = "https://www.eventbriteapi.com/v3/";

/// Where the static site picks the snapshot up from
pub const DEFAULT_OUTPUT_PATH: &str = "assets/data/eventbrite-upcoming.json";

/// Optional overrides for the non-secret settings
pub const CONFIG_FILE: &str = "config/eventbrite.toml";

pub const TOKEN_VAR: &str = "EVENTBRITE_TOKEN";
pub const API_URL_VAR: &str = "EVENTBRITE_API_URL";
pub const OUTPUT_VAR: &str = "EVENTBRITE_OUTPUT";

/// Runtime configuration for a sync run
#[derive(Debug, Clone)]
pub struct Config {
    /// Eventbrite private token, sent as a bearer token
    pub eventbrite_token: String,
    /// API root every endpoint path is joined onto
    pub api_base_url: Url,
    /// Snapshot file that gets overwritten on success
    pub output_path: PathBuf,
}

/// Contents of `config/eventbrite.toml`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub api_base_url: Option<String>,
    pub output_path: Option<PathBuf>,
}

impl FileConfig {
    /// Read the config file, treating a missing file as empty
    pub fn read(path: &Path) -> SyncResult<Self> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Config {
    /// Load configuration from `.env`, the environment and the config file
    pub fn load() -> SyncResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let file = FileConfig::read(Path::new(CONFIG_FILE))?;
        Self::from_sources(|key| env::var(key).ok(), file)
    }

    /// Build a config from an environment lookup and file settings.
    ///
    /// Environment values win over the file, the file wins over defaults.
    /// An empty token counts as missing.
    pub fn from_sources<F>(lookup: F, file: FileConfig) -> SyncResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let eventbrite_token = lookup(TOKEN_VAR)
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
            .ok_or_else(|| env_error(TOKEN_VAR))?;

        let api_base_url = lookup(API_URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .or(file.api_base_url)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let api_base_url = parse_base_url(&api_base_url)?;

        let output_path = lookup(OUTPUT_VAR)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
            .or(file.output_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH));

        Ok(Config {
            eventbrite_token,
            api_base_url,
            output_path,
        })
    }
}

/// Parse the API root, making sure relative joins land below it
fn parse_base_url(raw: &str) -> SyncResult<Url> {
    let raw = raw.trim();
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };

    let url = Url::parse(&normalized)?;
    if url.cannot_be_a_base() {
        return Err(config_error(&format!("API URL cannot be a base: {}", raw)));
    }
    Ok(url)
}
