//! Configuration types.
//!
//! Everything is read from the environment once at startup and then passed
//! down explicitly. Nothing reads the environment after construction.

use secrecy::SecretString;

use crate::error::ConfigError;
use crate::llm::{LlmConfig, OPENAI_BASE_URL};

/// Default relay listen port.
pub const DEFAULT_PORT: u16 = 3001;

/// Default chat model for classification.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Default sampling temperature (low, so the same email keeps its category).
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Default output ceiling; enough for a single category label.
pub const DEFAULT_MAX_TOKENS: u32 = 50;

/// Default relay endpoint used by the workflow.
pub const DEFAULT_RELAY_ENDPOINT: &str = "http://localhost:3001/classify";

/// Default mail REST API root.
pub const DEFAULT_MAIL_API_BASE: &str = "https://graph.microsoft.com/v1.0";

/// Classification relay configuration.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Port the HTTP server listens on.
    pub port: u16,
    /// Provider API key.
    pub api_key: SecretString,
    /// Chat model name.
    pub model: String,
    /// OpenAI-compatible API root.
    pub llm_base_url: String,
    /// Sampling temperature for classification.
    pub temperature: f32,
    /// Max output tokens for classification.
    pub max_tokens: u32,
}

impl RelayConfig {
    /// Build relay config with defaults around the given key.
    pub fn new(api_key: SecretString) -> Self {
        Self {
            port: DEFAULT_PORT,
            api_key,
            model: DEFAULT_MODEL.to_string(),
            llm_base_url: OPENAI_BASE_URL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Load from process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("OPENAI_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("OPENAI_API_KEY".to_string()))?;

        let mut config = Self::new(SecretString::from(api_key));

        if let Some(port) = lookup("PORT") {
            config.port = parse_value("PORT", &port)?;
        }
        if let Some(model) = lookup("MAIL_SORTER_MODEL") {
            config.model = model;
        }
        if let Some(url) = lookup("MAIL_SORTER_LLM_BASE_URL") {
            config.llm_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(temp) = lookup("MAIL_SORTER_TEMPERATURE") {
            config.temperature = parse_value("MAIL_SORTER_TEMPERATURE", &temp)?;
        }
        if let Some(max) = lookup("MAIL_SORTER_MAX_TOKENS") {
            config.max_tokens = parse_value("MAIL_SORTER_MAX_TOKENS", &max)?;
        }

        Ok(config)
    }

    /// Provider settings derived from this config.
    pub fn llm_config(&self) -> LlmConfig {
        LlmConfig {
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            base_url: self.llm_base_url.clone(),
        }
    }
}

/// Folder-routing workflow configuration.
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    /// Full URL of the relay's classify route.
    pub relay_endpoint: String,
    /// Mail REST API root (no trailing slash).
    pub mail_api_base: String,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            relay_endpoint: DEFAULT_RELAY_ENDPOINT.to_string(),
            mail_api_base: DEFAULT_MAIL_API_BASE.to_string(),
        }
    }
}

impl WorkflowConfig {
    /// Load from process environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            relay_endpoint: lookup("MAIL_SORTER_RELAY_URL").unwrap_or(defaults.relay_endpoint),
            mail_api_base: lookup("MAIL_SORTER_MAIL_API_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.mail_api_base),
        }
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn relay_config_defaults() {
        let config = RelayConfig::from_lookup(lookup_from(&[("OPENAI_API_KEY", "sk-test")])).unwrap();
        assert_eq!(config.port, 3001);
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(config.llm_base_url, "https://api.openai.com/v1");
        assert!((config.temperature - 0.3).abs() < f32::EPSILON);
        assert_eq!(config.max_tokens, 50);
        assert_eq!(config.api_key.expose_secret(), "sk-test");
    }

    #[test]
    fn relay_config_requires_api_key() {
        let err = RelayConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref k) if k == "OPENAI_API_KEY"));

        let err = RelayConfig::from_lookup(lookup_from(&[("OPENAI_API_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(_)));
    }

    #[test]
    fn relay_config_overrides() {
        let config = RelayConfig::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("PORT", "8088"),
            ("MAIL_SORTER_MODEL", "gpt-4o-mini"),
            ("MAIL_SORTER_LLM_BASE_URL", "http://127.0.0.1:9999/v1/"),
            ("MAIL_SORTER_TEMPERATURE", "0"),
            ("MAIL_SORTER_MAX_TOKENS", "10"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8088);
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.llm_base_url, "http://127.0.0.1:9999/v1");
        assert_eq!(config.temperature, 0.0);
        assert_eq!(config.max_tokens, 10);
    }

    #[test]
    fn relay_config_rejects_bad_port() {
        let err = RelayConfig::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("PORT", "not-a-port"),
        ]))
        .unwrap_err();
        match err {
            ConfigError::InvalidValue { key, .. } => assert_eq!(key, "PORT"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn relay_config_debug_hides_key() {
        let config = RelayConfig::new(SecretString::from("sk-very-secret"));
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-very-secret"));
    }

    #[test]
    fn workflow_config_defaults_and_overrides() {
        let defaults = WorkflowConfig::from_lookup(lookup_from(&[]));
        assert_eq!(defaults.relay_endpoint, "http://localhost:3001/classify");
        assert_eq!(defaults.mail_api_base, "https://graph.microsoft.com/v1.0");

        let custom = WorkflowConfig::from_lookup(lookup_from(&[
            ("MAIL_SORTER_RELAY_URL", "http://relay.internal/classify"),
            ("MAIL_SORTER_MAIL_API_URL", "http://mail.internal/api/"),
        ]));
        assert_eq!(custom.relay_endpoint, "http://relay.internal/classify");
        assert_eq!(custom.mail_api_base, "http://mail.internal/api");
    }
}
