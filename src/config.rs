use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Readmission Risk";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default model artifact, resolved against the working directory.
pub const DEFAULT_MODEL_PATH: &str = "readmission_model.onnx";

/// Default listen address (local only).
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8501";

/// Default ONNX output holding `[p(not readmitted), p(readmitted)]`.
pub const DEFAULT_PROBABILITY_OUTPUT: &str = "probabilities";

pub const ENV_MODEL_PATH: &str = "READMISSION_MODEL_PATH";
pub const ENV_BIND_ADDR: &str = "READMISSION_BIND_ADDR";
pub const ENV_PROBABILITY_OUTPUT: &str = "READMISSION_PROBA_OUTPUT";

/// Default tracing filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "readmission_lib=info,readmission_risk=info"
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid bind address '{value}': {reason}")]
    InvalidBindAddr { value: String, reason: String },
}

/// Settings resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub model_path: PathBuf,
    pub bind_addr: SocketAddr,
    pub probability_output: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8501)),
            probability_output: DEFAULT_PROBABILITY_OUTPUT.to_string(),
        }
    }
}

impl ServerConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (environment in production,
    /// a map in tests). Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let bind_addr = match get(ENV_BIND_ADDR) {
            Some(value) => value
                .trim()
                .parse::<SocketAddr>()
                .map_err(|e| ConfigError::InvalidBindAddr {
                    value: value.clone(),
                    reason: e.to_string(),
                })?,
            None => defaults.bind_addr,
        };

        Ok(Self {
            model_path: get(ENV_MODEL_PATH)
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),
            bind_addr,
            probability_output: get(ENV_PROBABILITY_OUTPUT)
                .unwrap_or(defaults.probability_output),
        })
    }
}
