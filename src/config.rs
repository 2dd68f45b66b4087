use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_NUTRITION_API_URL: &str = "https://api.api-ninjas.com/v1/nutrition";
pub const DEFAULT_MODEL_REPO_URL: &str =
    "https://huggingface.co/Xenova/vit-base-patch16-224/resolve/main";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: {value}")]
    InvalidAddr { var: &'static str, value: String },
    #[error("{var} must be a positive byte count, got {value}")]
    InvalidSize { var: &'static str, value: String },
}

/// Where the classification model lives and where to fetch it from.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub dir: PathBuf,
    /// `None` disables downloading missing files.
    pub repo_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub nutrition_api_url: String,
    pub bind_addr: SocketAddr,
    pub max_upload_bytes: usize,
    pub model: ModelConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // The lowercase name is what older `.env` files used.
        let api_key = lookup("API_KEY")
            .filter(|v| !v.trim().is_empty())
            .or_else(|| lookup("api_key").filter(|v| !v.trim().is_empty()));

        let nutrition_api_url = lookup("NUTRITION_API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_NUTRITION_API_URL.to_string());

        let bind_raw = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidAddr {
                var: "BIND_ADDR",
                value: bind_raw.clone(),
            })?;

        let max_upload_bytes = match lookup("MAX_UPLOAD_BYTES") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidSize {
                        var: "MAX_UPLOAD_BYTES",
                        value: raw,
                    })
                }
            },
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        let dir = lookup("MODEL_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("model"));

        let repo_url = match lookup("MODEL_REPO_URL") {
            Some(v) if v.trim().is_empty() => None,
            Some(v) => Some(v.trim().trim_end_matches('/').to_string()),
            None => Some(DEFAULT_MODEL_REPO_URL.to_string()),
        };

        Ok(Self {
            api_key,
            nutrition_api_url,
            bind_addr,
            max_upload_bytes,
            model: ModelConfig { dir, repo_url },
        })
    }
}
