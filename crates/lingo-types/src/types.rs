use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type LanguageCode = String;

/// Maximum accepted input length, counted in chars
pub const MAX_TEXT_CHARS: usize = 5000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagePair {
    pub source: LanguageCode,
    pub target: LanguageCode,
}

impl LanguagePair {
    pub fn new(source: impl Into<LanguageCode>, target: impl Into<LanguageCode>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn swapped(&self) -> Self {
        Self {
            source: self.target.clone(),
            target: self.source.clone(),
        }
    }

    pub fn is_identity(&self) -> bool {
        self.source == self.target
    }
}

/// Text plus language pair, built once a submit passes validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub pair: LanguagePair,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alternative {
    pub translation: String,
    /// Short register label, e.g. "informal"
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub explanation: String,
}

impl Alternative {
    pub fn new(
        translation: impl Into<String>,
        context: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            translation: translation.into(),
            context: context.into(),
            explanation: explanation.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub main_translation: String,
    /// Kept in the order the service returned them
    pub alternatives: Vec<Alternative>,
    pub source_pair: LanguagePair,
    pub source_text: String,
    pub timestamp: DateTime<Utc>,
}

impl TranslationResult {
    /// Every selectable output: the main translation first, then alternatives
    pub fn outputs(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.main_translation.as_str())
            .chain(self.alternatives.iter().map(|a| a.translation.as_str()))
    }
}

/// A persisted translation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: String,
    #[serde(flatten)]
    pub result: TranslationResult,
}

impl HistoryRecord {
    pub fn main_translation(&self) -> &str {
        &self.result.main_translation
    }
}
