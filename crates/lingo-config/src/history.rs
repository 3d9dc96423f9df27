use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_limit() -> usize {
    20
}

fn default_path() -> PathBuf {
    PathBuf::from("lingo-history.jsonl")
}

/// Where translation history is kept
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum HistoryBackend {
    /// The translation backend records history itself
    #[default]
    Remote,
    /// Local JSON lines file
    File,
}

impl std::str::FromStr for HistoryBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "remote" => Ok(Self::Remote),
            "file" => Ok(Self::File),
            other => Err(format!("unknown history backend: {other}")),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct HistoryConfig {
    pub backend: HistoryBackend,
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Only used by the file backend
    #[serde(default = "default_path")]
    pub path: PathBuf,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            backend: HistoryBackend::default(),
            limit: default_limit(),
            path: default_path(),
        }
    }
}
