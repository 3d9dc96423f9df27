//! Translation session state machine.
//!
//! A session owns the input text, the language pair, the phase and the last
//! received result. Network calls happen outside: [`Session::begin_submit`]
//! hands out a [`PendingTranslation`] tagged with a generation, and the
//! caller reports back through [`Session::finish`]. Outcomes carrying an
//! outdated generation are dropped.

use lingo_translator::TranslateError;
use lingo_types::{
    HistoryRecord, LanguageCode, LanguagePair, MAX_TEXT_CHARS, TranslationRequest,
    TranslationResult,
};

use crate::error::{SessionError, ValidationError};
use crate::selection::Selection;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Result,
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub source_text: String,
    pub pair: LanguagePair,
    pub phase: Phase,
    /// Last good result; survives later errors
    pub result: Option<TranslationResult>,
    pub selection: Selection,
}

impl SessionState {
    pub fn selected_output(&self) -> &str {
        self.selection.active()
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            Phase::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// A validated request the caller must run and report back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTranslation {
    pub generation: u64,
    pub request: TranslationRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// The session moved on before the response arrived
    Stale,
}

#[derive(Debug)]
pub struct Session {
    state: SessionState,
    generation: u64,
}

impl Session {
    pub fn new(pair: LanguagePair) -> Self {
        Self {
            state: SessionState {
                source_text: String::new(),
                pair,
                phase: Phase::Idle,
                result: None,
                selection: Selection::default(),
            },
            generation: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> &Phase {
        &self.state.phase
    }

    pub fn result(&self) -> Option<&TranslationResult> {
        self.state.result.as_ref()
    }

    pub fn selected_output(&self) -> &str {
        self.state.selected_output()
    }

    pub fn source_text(&self) -> &str {
        &self.state.source_text
    }

    pub fn pair(&self) -> &LanguagePair {
        &self.state.pair
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        self.state.phase == Phase::Loading
    }

    /// Replace the input, truncated to the character limit
    pub fn edit_text(&mut self, text: impl Into<String>) {
        let mut text = text.into();
        let cut = text.char_indices().nth(MAX_TEXT_CHARS).map(|(i, _)| i);
        if let Some(cut) = cut {
            tracing::debug!("Input truncated to {MAX_TEXT_CHARS} characters");
            text.truncate(cut);
        }
        self.state.source_text = text;
    }

    pub fn edit_pair(&mut self, pair: LanguagePair) {
        self.state.pair = pair;
    }

    pub fn set_source(&mut self, code: impl Into<LanguageCode>) {
        self.state.pair.source = code.into();
    }

    pub fn set_target(&mut self, code: impl Into<LanguageCode>) {
        self.state.pair.target = code.into();
    }

    /// Whether the submit shortcut may fire for the current input
    pub fn can_submit(&self) -> bool {
        !self.is_loading() && !self.state.source_text.trim().is_empty()
    }

    /// Submit the text and pair currently held by the session
    pub fn begin_submit_current(&mut self) -> Result<PendingTranslation, SessionError> {
        let text = self.state.source_text.clone();
        let pair = self.state.pair.clone();
        self.begin_submit(text, pair)
    }

    pub fn begin_submit(
        &mut self,
        text: impl Into<String>,
        pair: LanguagePair,
    ) -> Result<PendingTranslation, SessionError> {
        if self.is_loading() {
            tracing::debug!("Submit rejected: translation already in flight");
            return Err(SessionError::Busy);
        }

        let text = text.into();
        if let Err(e) = validate(&text, &pair) {
            tracing::debug!("Submit rejected: {e}");
            self.state.phase = Phase::Error(e.to_string());
            return Err(e.into());
        }

        self.generation += 1;
        self.state.source_text = text.clone();
        self.state.pair = pair.clone();
        self.state.phase = Phase::Loading;

        Ok(PendingTranslation {
            generation: self.generation,
            request: TranslationRequest { text, pair },
        })
    }

    /// Apply the outcome of the request tagged `generation`
    pub fn finish(
        &mut self,
        generation: u64,
        outcome: Result<TranslationResult, TranslateError>,
    ) -> Completion {
        if generation != self.generation || !self.is_loading() {
            tracing::debug!(
                "Discarding response for generation {generation} (current {})",
                self.generation
            );
            return Completion::Stale;
        }

        match outcome {
            Ok(result) => {
                self.state.selection.seed(&result);
                self.state.result = Some(result);
                self.state.phase = Phase::Result;
            }
            Err(e) => {
                tracing::warn!("Translation failed: {e}");
                self.state.phase = Phase::Error(e.message());
            }
        }

        Completion::Applied
    }

    /// Swap source and target.
    ///
    /// With a result on screen the selected output becomes the new input
    /// and the result is dropped.
    pub fn swap_languages(&mut self) {
        self.state.pair = self.state.pair.swapped();

        if self.state.phase == Phase::Result {
            self.generation += 1;
            self.state.source_text = self.state.selection.active().to_string();
            self.state.result = None;
            self.state.selection.clear();
            self.state.phase = Phase::Idle;
        }
    }

    /// Show a past translation without contacting the service
    pub fn load_from_history(&mut self, record: &HistoryRecord) {
        self.generation += 1;
        self.state.source_text = record.result.source_text.clone();
        self.state.pair = record.result.source_pair.clone();
        self.state.selection.seed(&record.result);
        self.state.result = Some(record.result.clone());
        self.state.phase = Phase::Result;
    }

    pub fn select(&mut self, text: impl Into<String>) {
        self.state.selection.select(text);
    }

    /// Select the main translation (0) or an alternative (1..)
    pub fn select_output(&mut self, index: usize) -> Option<&str> {
        let result = self.state.result.as_ref()?;
        self.state.selection.select_index(result, index)
    }
}

pub fn validate(text: &str, pair: &LanguagePair) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::EmptyText);
    }

    let chars = text.chars().count();
    if chars > MAX_TEXT_CHARS {
        return Err(ValidationError::TextTooLong { chars });
    }

    if pair.is_identity() {
        return Err(ValidationError::SameLanguages);
    }

    Ok(())
}
