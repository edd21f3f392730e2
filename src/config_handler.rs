use std::fs;
use std::time::Duration;

use anyhow::Context;
use secrecy::SecretString;
use serde::Deserialize;
use tracing::log;

const DEFAULT_CONFIG_PATH: &str = "./deployment/config.json";

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default="default_port")]
    pub port: u16,

    #[serde(default="default_sportmonks_url")]
    pub sportmonks_url: String,

    #[serde(default="default_api_token")]
    pub api_token: SecretString,

    #[serde(default="default_poll_interval_s")]
    pub poll_interval_s: u64,

    #[serde(default="default_request_timeout_s")]
    pub request_timeout_s: u64,

    #[serde(default="default_static_dir")]
    pub static_dir: String,
}

fn default_port() -> u16 {
    5000
}

fn default_sportmonks_url() -> String {
    "https://api.sportmonks.com/v3/football".to_string()
}

fn default_api_token() -> SecretString {
    SecretString::new(String::new().into_boxed_str())
}

fn default_poll_interval_s() -> u64 {
    60
}

fn default_request_timeout_s() -> u64 {
    30
}

fn default_static_dir() -> String {
    "./dist".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: default_port(),
            sportmonks_url: default_sportmonks_url(),
            api_token: default_api_token(),
            poll_interval_s: default_poll_interval_s(),
            request_timeout_s: default_request_timeout_s(),
            static_dir: default_static_dir(),
        }
    }
}

impl Config {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_s.max(1))
    }

    /// Stays below the poll interval so a cycle resolves before the next one starts.
    pub fn request_timeout(&self) -> Duration {
        let interval = self.poll_interval();
        Duration::from_secs(self.request_timeout_s.max(1)).min(interval - interval / 10)
    }

    /// Parses a config document, every key is optional.
    pub fn parse(data: &str) -> anyhow::Result<Config> {
        Ok(serde_json::from_str(data)?)
    }

    fn apply_env(mut self) -> anyhow::Result<Config> {
        if let Ok(token) = std::env::var("SPORTMONKS_API_TOKEN") {
            self.api_token = SecretString::new(token.into_boxed_str());
            log::info!("[CONFIG] SPORTMONKS_API_TOKEN set");
        }
        if let Ok(port) = std::env::var("PORT") {
            self.port = port.parse().with_context(|| format!("PORT is not a port number: {port}"))?;
            log::info!("[CONFIG] PORT {}", self.port);
        }
        Ok(self)
    }
}

/// Reads `CONFIG_PATH`, or the default path when unset. Only the default path may be missing.
pub fn get_config() -> anyhow::Result<Config> {
    let explicit_path = std::env::var("CONFIG_PATH").ok();
    let path = explicit_path.clone().unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let result = match fs::read_to_string(&path) {
        Ok(data) => Config::parse(&data)
            .with_context(|| format!("Could not parse JSON at {path}!"))?,
        Err(e) if explicit_path.is_none() => {
            log::info!("[CONFIG] No config at {path} ({e}), using defaults");
            Config::default()
        },
        Err(e) => return Err(e).with_context(|| format!("Unable to read config at {path}")),
    };
    let result = result.apply_env()?;
    if result.request_timeout() < Duration::from_secs(result.request_timeout_s) {
        log::warn!("[CONFIG] request_timeout_s {} capped to {:.2?} by poll_interval_s {}",
            result.request_timeout_s, result.request_timeout(), result.poll_interval_s);
    }
    log::info!("[CONFIG] {:?}", result);
    Ok(result)
}
