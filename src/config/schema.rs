use crate::agent::openai::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use crate::error::ConfigError;
use crate::session::MAX_SESSION_ITEMS;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Where this config was read from, if anywhere.
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
    /// Agent credential. Usually supplied as `OPENAI_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    /// Sampling temperature; omitted from agent calls when unset.
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default = "default_agent_base_url")]
    pub agent_base_url: String,
    /// Deadline for a single agent call.
    #[serde(default = "default_agent_timeout_secs")]
    pub agent_timeout_secs: u64,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

fn default_model() -> String {
    DEFAULT_MODEL.into()
}

fn default_agent_base_url() -> String {
    DEFAULT_BASE_URL.into()
}

fn default_agent_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: None,
            api_key: None,
            model: default_model(),
            temperature: None,
            agent_base_url: default_agent_base_url(),
            agent_timeout_secs: default_agent_timeout_secs(),
            gateway: GatewayConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

impl Config {
    /// The credential, if one is set and not blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(temperature) = self.temperature
            && !(0.0..=2.0).contains(&temperature)
        {
            return Err(ConfigError::Validation(format!(
                "temperature must be within 0.0..=2.0, got {temperature}"
            )));
        }
        if self.agent_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "agent_timeout_secs must be greater than zero".into(),
            ));
        }
        if self.gateway.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "gateway.request_timeout_secs must be greater than zero".into(),
            ));
        }
        if self.session.max_items == 0 {
            return Err(ConfigError::Validation(
                "session.max_items must be greater than zero".into(),
            ));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::Validation("model must not be empty".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Bind host (default: 0.0.0.0)
    #[serde(default = "default_gateway_host")]
    pub host: String,
    /// Bind port (default: 8787)
    #[serde(default = "default_gateway_port")]
    pub port: u16,
    /// Browser origins allowed by CORS; `*` allows any.
    #[serde(default = "default_cors_allow_origins")]
    pub cors_allow_origins: Vec<String>,
    /// Whole-request deadline (default: 120s), longer than the agent's.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Request body cap (default: 2 MiB)
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_gateway_host() -> String {
    "0.0.0.0".into()
}

fn default_gateway_port() -> u16 {
    8787
}

fn default_cors_allow_origins() -> Vec<String> {
    vec!["http://localhost:5173".into()]
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_max_body_bytes() -> usize {
    2 * 1024 * 1024
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_gateway_host(),
            port: default_gateway_port(),
            cors_allow_origins: default_cors_allow_origins(),
            request_timeout_secs: default_request_timeout_secs(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Turns remembered per chat session.
    #[serde(default = "default_max_items")]
    pub max_items: usize,
}

fn default_max_items() -> usize {
    MAX_SESSION_ITEMS
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_items: default_max_items(),
        }
    }
}
