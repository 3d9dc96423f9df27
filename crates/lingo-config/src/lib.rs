use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use self::api::ApiConfig;
use self::history::{HistoryBackend, HistoryConfig};
use self::session::SessionConfig;

pub mod api;
pub mod history;
pub mod session;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
}

const DEFAULT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub history: HistoryConfig,
    /// Capacity of the command and render channels
    pub channel_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            session: SessionConfig::default(),
            history: HistoryConfig::default(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl Config {
    /// Defaults overridden by environment variables
    pub fn new() -> Self {
        let mut config = Config::default();
        config.apply_env(|key| env::var(key).ok());
        config
    }

    /// Load a JSON profile, then apply environment overrides on top
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        tracing::info!("Loading config from {}", path.display());
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut config: Config = serde_json::from_reader(reader)?;
        if config.channel_capacity == 0 {
            config.channel_capacity = DEFAULT_CHANNEL_CAPACITY;
        }
        config.apply_env(|key| env::var(key).ok());
        Ok(config)
    }

    pub fn apply_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = var("LINGO_API_URL") {
            self.api.base_url = url;
        }

        if let Some(timeout) = var("LINGO_TIMEOUT_SECONDS").and_then(|v| v.parse().ok()) {
            self.api.timeout_seconds = timeout;
        }

        if let Some(from) = var("LINGO_FROM_LANG") {
            self.session.from_lang = from;
        }

        if let Some(to) = var("LINGO_TO_LANG") {
            self.session.to_lang = to;
        }

        match var("LINGO_HISTORY_BACKEND").map(|v| v.parse::<HistoryBackend>()) {
            Some(Ok(backend)) => self.history.backend = backend,
            Some(Err(e)) => tracing::warn!("{e}, keeping {:?}", self.history.backend),
            None => {}
        }

        if let Some(limit) = var("LINGO_HISTORY_LIMIT").and_then(|v| v.parse().ok()) {
            self.history.limit = limit;
        }

        if let Some(path) = var("LINGO_HISTORY_PATH") {
            self.history.path = path.into();
        }
    }
}
