use std::sync::Arc;

use lingo_api::ApiClient;
use lingo_config::Config;
use lingo_config::history::HistoryBackend;
use lingo_core::{LanguageCatalog, LanguageSource, Session, SessionState};
use lingo_history::{FileHistoryStore, History, HistoryStore};
use lingo_translator::Translator;
use lingo_types::LanguagePair;
use tokio::sync::RwLock;

/// Shared services, handed to every task
pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub translator: Arc<dyn Translator>,
    pub history_store: Arc<dyn HistoryStore>,
    pub languages: Arc<dyn LanguageSource>,
}

impl AppState {
    pub fn new(
        config: Config,
        translator: Arc<dyn Translator>,
        history_store: Arc<dyn HistoryStore>,
        languages: Arc<dyn LanguageSource>,
    ) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            translator,
            history_store,
            languages,
        }
    }

    /// Wire the HTTP backend and the configured history store
    pub fn from_config(config: Config) -> anyhow::Result<(Self, ApiClient)> {
        let api = ApiClient::new(config.api.clone())?;

        let history_store: Arc<dyn HistoryStore> = match config.history.backend {
            HistoryBackend::Remote => Arc::new(api.clone()),
            HistoryBackend::File => {
                tracing::info!("Using local history at {}", config.history.path.display());
                Arc::new(FileHistoryStore::new(config.history.path.clone()))
            }
        };

        let state = Self::new(
            config,
            Arc::new(api.clone()),
            history_store,
            Arc::new(api.clone()),
        );
        Ok((state, api))
    }
}

/// Everything the event loop owns exclusively
pub struct ClientState {
    pub session: Session,
    pub history: History,
    pub catalog: LanguageCatalog,
    /// Input ended while a translation was still loading
    pub quit_pending: bool,
}

impl ClientState {
    pub fn new(config: &Config) -> Self {
        Self {
            session: Session::new(LanguagePair::new(
                config.session.from_lang.clone(),
                config.session.to_lang.clone(),
            )),
            history: History::new(config.history.limit),
            catalog: LanguageCatalog::new(),
            quit_pending: false,
        }
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            state: self.session.state().clone(),
            pair_label: self.catalog.pair_label(self.session.pair()),
        }
    }
}

/// Snapshot sent to the renderer
#[derive(Debug, Clone)]
pub struct SessionView {
    pub state: SessionState,
    pub pair_label: String,
}
