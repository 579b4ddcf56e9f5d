use std::{env, fmt, time::Duration};

use log::{debug, error, info};
use url::Url;

use crate::error::{BotError, Result};

pub const DEFAULT_API_URL: &str = "https://router.huggingface.co/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "meta-llama/Llama-3.1-8B-Instruct:cerebras";
pub const DEFAULT_PREFIX: &str = "!";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct Config {
    pub discord_token: String,
    pub hf_token: String,
    pub api_url: Url,
    pub model: String,
    pub command_prefix: String,
    pub request_timeout: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("discord_token", &"<redacted>")
            .field("hf_token", &"<redacted>")
            .field("api_url", &self.api_url.as_str())
            .field("model", &self.model)
            .field("command_prefix", &self.command_prefix)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Config {
    /// Load configuration from the process environment and an optional `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if a required secret is missing or an optional setting is invalid.
    pub fn from_env() -> Result<Self> {
        debug!("Loading configuration from environment");
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from any variable source. Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::ConfigMissing`] when `DISCORD_BOT_TOKEN` or `HF_TOKEN`
    /// is absent, and [`BotError::InvalidConfig`] when `HF_API_URL` or
    /// `HF_TIMEOUT_SECS` cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let require = |name: &str| {
            get(name).ok_or_else(|| {
                error!("Failed to load {name} from environment");
                BotError::ConfigMissing(name.to_string())
            })
        };

        let discord_token = require("DISCORD_BOT_TOKEN")?;
        let hf_token = require("HF_TOKEN")?;

        let raw_url = get("HF_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = Url::parse(raw_url.trim()).map_err(|e| BotError::InvalidConfig {
            name: "HF_API_URL".to_string(),
            message: e.to_string(),
        })?;

        let model = get("HF_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let command_prefix = get("BOT_PREFIX").unwrap_or_else(|| DEFAULT_PREFIX.to_string());

        let request_timeout = match get("HF_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(BotError::InvalidConfig {
                        name: "HF_TIMEOUT_SECS".to_string(),
                        message: format!("expected a positive number of seconds, got {raw:?}"),
                    });
                }
            },
            None => DEFAULT_TIMEOUT,
        };

        info!("Configuration loaded successfully");
        debug!("Discord token length: {} characters", discord_token.len());
        debug!("HF token length: {} characters", hf_token.len());
        debug!("Inference endpoint: {api_url}");
        debug!("Inference model: {model}");
        debug!("Command prefix: {command_prefix}");
        debug!("Request timeout: {request_timeout:?}");

        Ok(Self {
            discord_token,
            hf_token,
            api_url,
            model,
            command_prefix,
            request_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_only_secrets_set() {
        let config = Config::from_lookup(lookup(&[
            ("DISCORD_BOT_TOKEN", "discord-secret"),
            ("HF_TOKEN", "hf_secret"),
        ]))
        .expect("config should load");

        assert_eq!(config.discord_token, "discord-secret");
        assert_eq!(config.hf_token, "hf_secret");
        assert_eq!(config.api_url.as_str(), DEFAULT_API_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.command_prefix, "!");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn missing_discord_token_fails() {
        let err = Config::from_lookup(lookup(&[("HF_TOKEN", "hf_secret")])).unwrap_err();
        assert!(matches!(err, BotError::ConfigMissing(ref name) if name == "DISCORD_BOT_TOKEN"));
    }

    #[test]
    fn empty_hf_token_counts_as_missing() {
        let err = Config::from_lookup(lookup(&[
            ("DISCORD_BOT_TOKEN", "discord-secret"),
            ("HF_TOKEN", "  "),
        ]))
        .unwrap_err();
        assert!(matches!(err, BotError::ConfigMissing(ref name) if name == "HF_TOKEN"));
    }

    #[test]
    fn overrides_are_honoured() {
        let config = Config::from_lookup(lookup(&[
            ("DISCORD_BOT_TOKEN", "discord-secret"),
            ("HF_TOKEN", "hf_secret"),
            ("HF_API_URL", "http://localhost:8080/v1/chat/completions"),
            ("HF_MODEL", "Qwen/Qwen3-8B"),
            ("HF_TIMEOUT_SECS", "30"),
            ("BOT_PREFIX", "?"),
        ]))
        .expect("config should load");

        assert_eq!(
            config.api_url.as_str(),
            "http://localhost:8080/v1/chat/completions"
        );
        assert_eq!(config.model, "Qwen/Qwen3-8B");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.command_prefix, "?");
    }

    #[test]
    fn bad_url_is_rejected() {
        let err = Config::from_lookup(lookup(&[
            ("DISCORD_BOT_TOKEN", "discord-secret"),
            ("HF_TOKEN", "hf_secret"),
            ("HF_API_URL", "not a url"),
        ]))
        .unwrap_err();
        assert!(matches!(err, BotError::InvalidConfig { ref name, .. } if name == "HF_API_URL"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = Config::from_lookup(lookup(&[
            ("DISCORD_BOT_TOKEN", "discord-secret"),
            ("HF_TOKEN", "hf_secret"),
            ("HF_TIMEOUT_SECS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, BotError::InvalidConfig { ref name, .. } if name == "HF_TIMEOUT_SECS"));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let config = Config::from_lookup(lookup(&[
            ("DISCORD_BOT_TOKEN", "discord-secret"),
            ("HF_TOKEN", "hf_secret"),
        ]))
        .expect("config should load");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("discord-secret"));
        assert!(!rendered.contains("hf_secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
