//! Server configuration

use anyhow::Result;
use classifier_lib::DEFAULT_ARTIFACT_PATH;
use serde::Deserialize;
use std::path::PathBuf;

/// Environment prefix, e.g. `EXPENSE_SERVER_PORT=5001`
pub const ENV_PREFIX: &str = "EXPENSE_SERVER";

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port for the prediction endpoint
    #[serde(default = "default_port")]
    pub port: u16,

    /// Fitted pipeline written by the trainer
    #[serde(default = "default_artifact_path")]
    pub artifact_path: PathBuf,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_artifact_path() -> PathBuf {
    PathBuf::from(DEFAULT_ARTIFACT_PATH)
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            artifact_path: default_artifact_path(),
        }
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .try_parsing(true)
}

impl ServerConfig {
    /// Load configuration from the environment, falling back to defaults
    pub fn load() -> Result<Self> {
        Self::from_source(environment())
    }

    fn from_source<S>(source: S) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = config::Config::builder().add_source(source).build()?;
        Ok(config.try_deserialize()?)
    }

    /// Socket address to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
