//! In-process stand-ins for the backend and a harness around the event loop

use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use kanal::{AsyncReceiver, AsyncSender};
use lingo_config::Config;
use lingo_core::{CatalogError, LanguageSource};
use lingo_history::{HistoryError, HistoryStore};
use lingo_translator::{TranslateError, Translator};
use lingo_types::{
    Alternative, HistoryRecord, LanguageCode, LanguagePair, TranslationResult,
};
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use crate::events::{AppEvent, event_loop};
use crate::state::{AppState, SessionView};

pub enum Reply {
    Translation(&'static str, Vec<Alternative>),
    Timeout,
}

#[derive(Default)]
pub struct FakeTranslator {
    calls: AtomicUsize,
    script: Mutex<VecDeque<Reply>>,
    gate: Option<Arc<Notify>>,
}

impl FakeTranslator {
    pub fn scripted(replies: Vec<Reply>) -> Self {
        Self {
            script: Mutex::new(replies.into()),
            ..Default::default()
        }
    }

    /// Every call waits for a `notify_one` on the returned handle
    pub fn gated(replies: Vec<Reply>) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let translator = Self {
            gate: Some(gate.clone()),
            ..Self::scripted(replies)
        };
        (translator, gate)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Translator for FakeTranslator {
    async fn translate(
        &self,
        text: &str,
        pair: &LanguagePair,
    ) -> Result<TranslationResult, TranslateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let reply = self.script.lock().unwrap().pop_front();
        match reply {
            Some(Reply::Timeout) => Err(TranslateError::Timeout),
            Some(Reply::Translation(main, alternatives)) => Ok(TranslationResult {
                main_translation: main.to_string(),
                alternatives,
                source_pair: pair.clone(),
                source_text: text.to_string(),
                timestamp: Utc::now(),
            }),
            None => Err(TranslateError::ApiError {
                status: 500,
                detail: Some("script exhausted".to_string()),
            }),
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<HistoryRecord>>,
    fail_clear: bool,
}

impl MemoryStore {
    pub fn with_records(records: Vec<HistoryRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Default::default()
        }
    }

    pub fn failing_clear(records: Vec<HistoryRecord>) -> Self {
        Self {
            fail_clear: true,
            ..Self::with_records(records)
        }
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl HistoryStore for MemoryStore {
    async fn list(&self, limit: usize) -> Result<Vec<HistoryRecord>, HistoryError> {
        Ok(self.records.lock().unwrap().iter().take(limit).cloned().collect())
    }

    async fn append(&self, record: &HistoryRecord) -> Result<(), HistoryError> {
        self.records.lock().unwrap().insert(0, record.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), HistoryError> {
        if self.fail_clear {
            return Err(HistoryError::Backend("delete refused".to_string()));
        }
        self.records.lock().unwrap().clear();
        Ok(())
    }
}

pub struct FakeLanguages {
    pub available: bool,
}

#[async_trait::async_trait]
impl LanguageSource for FakeLanguages {
    async fn fetch(&self) -> Result<BTreeMap<LanguageCode, String>, CatalogError> {
        if !self.available {
            return Err(CatalogError::Unavailable("connection refused".to_string()));
        }
        Ok(BTreeMap::from([
            ("en".to_string(), "English".to_string()),
            ("tr".to_string(), "Türkçe".to_string()),
        ]))
    }
}

pub fn record(id: &str, text: &str, main: &str) -> HistoryRecord {
    HistoryRecord {
        id: id.to_string(),
        result: TranslationResult {
            main_translation: main.to_string(),
            alternatives: vec![Alternative::new("howdy", "regional", "southern US")],
            source_pair: LanguagePair::new("tr", "en"),
            source_text: text.to_string(),
            timestamp: Utc::now(),
        },
    }
}

pub fn hello_reply() -> Reply {
    Reply::Translation(
        "hello",
        vec![Alternative::new("hi", "informal", "casual greeting")],
    )
}

/// Event loop running against fakes
pub struct Harness {
    pub inbound: AsyncSender<AppEvent>,
    pub outbound: AsyncReceiver<AppEvent>,
    pub handle: JoinHandle<anyhow::Result<()>>,
    /// Notices emitted before the first session view
    pub startup_notices: Vec<String>,
    cancel: CancellationToken,
}

impl Harness {
    pub async fn start(
        translator: Arc<FakeTranslator>,
        store: Arc<MemoryStore>,
        languages: FakeLanguages,
    ) -> Self {
        let state = Arc::new(AppState::new(
            Config::default(),
            translator,
            store,
            Arc::new(languages),
        ));
        let (inbound, inbound_rx) = kanal::unbounded_async();
        let (outbound_tx, outbound) = kanal::unbounded_async();
        let cancel = CancellationToken::new();

        let handle = tokio::spawn(event_loop(
            state,
            inbound_rx,
            inbound.clone(),
            outbound_tx,
            cancel.clone(),
        ));

        let mut harness = Self {
            inbound,
            outbound,
            handle,
            startup_notices: Vec::new(),
            cancel,
        };

        loop {
            match harness.next_event().await {
                AppEvent::Notice(notice) => harness.startup_notices.push(notice),
                AppEvent::ShowSession(_) => break,
                other => panic!("Unexpected startup event: {other:?}"),
            }
        }

        harness
    }

    pub async fn input(&self, line: &str) {
        self.inbound
            .send(AppEvent::Input(line.to_string()))
            .await
            .expect("event loop gone");
    }

    /// Stdin reached EOF
    pub async fn close_input(&self) {
        self.inbound
            .send(AppEvent::InputClosed)
            .await
            .expect("event loop gone");
    }

    pub async fn next_event(&self) -> AppEvent {
        match timeout(Duration::from_secs(2), self.outbound.recv()).await {
            Ok(Ok(event)) => event,
            Ok(Err(e)) => panic!("Channel error: {e}"),
            Err(_) => panic!("Timeout waiting for UI event"),
        }
    }

    pub async fn next_session(&self) -> SessionView {
        loop {
            if let AppEvent::ShowSession(view) = self.next_event().await {
                return view;
            }
        }
    }

    pub async fn next_notice(&self) -> String {
        loop {
            if let AppEvent::Notice(notice) = self.next_event().await {
                return notice;
            }
        }
    }

    pub async fn history(&self) -> Vec<HistoryRecord> {
        self.input(":history").await;
        loop {
            if let AppEvent::ShowHistory(records) = self.next_event().await {
                return records;
            }
        }
    }

    /// No UI event arrives within a short window
    pub async fn assert_quiet(&self) {
        let result = timeout(Duration::from_millis(100), self.outbound.recv()).await;
        assert!(result.is_err(), "Unexpected UI event: {result:?}");
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
