use std::path::PathBuf;

use clap::Parser;
use lingo_config::Config;

#[derive(Debug, Parser)]
#[command(name = "lingo", about = "Translate text with alternatives and history")]
pub struct Cli {
    /// JSON profile to load instead of the defaults
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Source language code
    #[arg(long)]
    pub from: Option<String>,

    /// Target language code
    #[arg(long)]
    pub to: Option<String>,

    /// Translation backend URL
    #[arg(long)]
    pub api_url: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}

impl Cli {
    /// Profile or environment defaults, then flags on top
    pub fn resolve_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::new(),
        };

        if let Some(from) = &self.from {
            config.session.from_lang = from.clone();
        }
        if let Some(to) = &self.to {
            config.session.to_lang = to.clone();
        }
        if let Some(url) = &self.api_url {
            config.api.base_url = url.clone();
        }

        Ok(config)
    }
}
