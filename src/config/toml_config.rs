use crate::domain::catalog::{is_known_module, MODULES};
use crate::utils::error::{Result, StudioError};
use crate::utils::validation::{
    validate_path_segment, validate_positive_number, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "https://api.agpt.co";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    pub backend: BackendConfig,
    pub generation: GenerationConfig,
    pub polling: PollingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub api_key: String,
    pub graph_id: Option<String>,
    /// module id -> agent id, used by the per-module strategy
    pub agents: BTreeMap<String, String>,
    pub request_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            api_key: String::new(),
            graph_id: None,
            agents: BTreeMap::new(),
            request_timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    #[default]
    PerModule,
    Graph,
}

/// What the proxy does when the backend key (or graph id) is not configured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingCredentials {
    #[default]
    Demo,
    Strict,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub strategy: Strategy,
    pub missing_credentials: MissingCredentials,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    pub interval_ms: u64,
    pub max_attempts: u32,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: 3_000,
            max_attempts: 60,
        }
    }
}

impl PollingConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl StudioConfig {
    /// Loads the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parses TOML after substituting `${VAR}` references.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;

        let mut config: StudioConfig =
            toml::from_str(&processed).map_err(|e| StudioError::InvalidConfigValue {
                field: "toml".to_string(),
                value: String::new(),
                reason: format!("TOML parsing error: {}", e),
            })?;

        config.backend.graph_id = config.backend.graph_id.filter(|id| !id.trim().is_empty());
        Ok(config)
    }

    /// Replaces `${VAR}` with the environment value. Unset variables become empty,
    /// so an unset `${AUTOGPT_API_KEY}` reads as "no credentials".
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| StudioError::InvalidConfigValue {
            field: "toml".to_string(),
            value: String::new(),
            reason: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| {
                tracing::debug!("Environment variable {} is not set", var_name);
                String::new()
            })
        });

        Ok(result.to_string())
    }

    pub fn from_env() -> Result<Self> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from environment-style lookups.
    pub fn from_env_with<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = StudioConfig::default();

        if let Some(url) = get("AUTOGPT_API_URL") {
            config.backend.base_url = url;
        }
        config.backend.api_key = get("AUTOGPT_API_KEY").unwrap_or_default();
        config.backend.graph_id = get("AUTOGPT_GRAPH_ID");

        for module in MODULES.iter() {
            let var = format!("AGENT_{}", module.id.to_ascii_uppercase());
            if let Some(agent_id) = get(&var) {
                config.backend.agents.insert(module.id.to_string(), agent_id);
            }
        }

        if let Some(raw) = get("STUDIO_STRATEGY") {
            config.generation.strategy = match raw.trim().to_ascii_lowercase().as_str() {
                "per_module" | "per-module" => Strategy::PerModule,
                "graph" => Strategy::Graph,
                _ => return Err(invalid("STUDIO_STRATEGY", &raw, "expected 'per_module' or 'graph'")),
            };
        }

        if let Some(raw) = get("STUDIO_MISSING_CREDENTIALS") {
            config.generation.missing_credentials = match raw.trim().to_ascii_lowercase().as_str() {
                "demo" => MissingCredentials::Demo,
                "strict" => MissingCredentials::Strict,
                _ => return Err(invalid("STUDIO_MISSING_CREDENTIALS", &raw, "expected 'demo' or 'strict'")),
            };
        }

        if let Some(raw) = get("STUDIO_POLL_INTERVAL_MS") {
            config.polling.interval_ms = parse_number("STUDIO_POLL_INTERVAL_MS", &raw)?;
        }
        if let Some(raw) = get("STUDIO_POLL_MAX_ATTEMPTS") {
            config.polling.max_attempts = parse_number("STUDIO_POLL_MAX_ATTEMPTS", &raw)?;
        }
        if let Some(raw) = get("STUDIO_REQUEST_TIMEOUT_SECS") {
            config.backend.request_timeout_secs = parse_number("STUDIO_REQUEST_TIMEOUT_SECS", &raw)?;
        }

        Ok(config)
    }

    /// True when the configured strategy cannot reach the backend.
    pub fn credentials_missing(&self) -> bool {
        if self.backend.api_key.trim().is_empty() {
            return true;
        }
        match self.generation.strategy {
            Strategy::PerModule => false,
            Strategy::Graph => self
                .backend
                .graph_id
                .as_deref()
                .map_or(true, |id| id.trim().is_empty()),
        }
    }

    pub fn agent_for(&self, module_id: &str) -> Option<&str> {
        self.backend
            .agents
            .get(module_id)
            .map(String::as_str)
            .filter(|id| !id.trim().is_empty())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.backend.request_timeout_secs)
    }
}

fn invalid(field: &str, value: &str, reason: &str) -> StudioError {
    StudioError::InvalidConfigValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_number<T: std::str::FromStr>(field: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| invalid(field, raw, "expected a non-negative integer"))
}

impl Validate for StudioConfig {
    fn validate(&self) -> Result<()> {
        validate_url("backend.base_url", &self.backend.base_url)?;
        validate_positive_number("polling.max_attempts", u64::from(self.polling.max_attempts), 1)?;
        validate_positive_number("backend.request_timeout_secs", self.backend.request_timeout_secs, 1)?;

        for (module_id, agent_id) in &self.backend.agents {
            if !is_known_module(module_id) {
                return Err(invalid(
                    "backend.agents",
                    module_id,
                    "not a module in the catalog",
                ));
            }
            if !agent_id.trim().is_empty() {
                validate_path_segment(&format!("backend.agents.{}", module_id), agent_id)?;
            }
        }

        if let Some(graph_id) = &self.backend.graph_id {
            validate_path_segment("backend.graph_id", graph_id)?;
        }

        Ok(())
    }
}
