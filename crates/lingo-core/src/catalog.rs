use std::collections::BTreeMap;

use lingo_types::{LanguageCode, LanguagePair};

use crate::error::CatalogError;

/// Source of the code -> display name mapping
#[async_trait::async_trait]
pub trait LanguageSource: Send + Sync {
    async fn fetch(&self) -> Result<BTreeMap<LanguageCode, String>, CatalogError>;
}

/// Cached language names.
///
/// Codes are what gets submitted, so a failed fetch only costs the
/// display names and leaves a warning behind.
#[derive(Debug, Default)]
pub struct LanguageCatalog {
    names: BTreeMap<LanguageCode, String>,
    warning: Option<String>,
}

impl LanguageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn refresh(&mut self, source: &dyn LanguageSource) {
        let fetched = source.fetch().await;
        self.apply(fetched);
    }

    /// Keep the previous mapping when the fetch failed
    pub fn apply(&mut self, fetched: Result<BTreeMap<LanguageCode, String>, CatalogError>) {
        match fetched {
            Ok(names) => {
                tracing::debug!("Language catalog loaded: {} languages", names.len());
                self.names = names;
                self.warning = None;
            }
            Err(e) => {
                tracing::warn!("{e}");
                self.warning = Some(e.to_string());
            }
        }
    }

    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.names.contains_key(code)
    }

    /// Falls back to the code itself
    pub fn display_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.names.get(code).map(String::as_str).unwrap_or(code)
    }

    pub fn pair_label(&self, pair: &LanguagePair) -> String {
        format!(
            "{} → {}",
            self.display_name(&pair.source),
            self.display_name(&pair.target)
        )
    }

    pub fn languages(&self) -> impl Iterator<Item = (&str, &str)> {
        self.names.iter().map(|(code, name)| (code.as_str(), name.as_str()))
    }
}
