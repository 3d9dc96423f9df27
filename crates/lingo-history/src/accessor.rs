use std::sync::Arc;

use lingo_types::{HistoryRecord, TranslationResult};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::{HistoryError, HistoryStore};

/// In-memory view of the history store.
///
/// History is auxiliary: store failures are logged here and never
/// propagated to the caller.
#[derive(Debug, Default)]
pub struct History {
    records: Vec<HistoryRecord>,
    limit: usize,
    /// Advances on every clear
    epoch: u64,
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            records: Vec::new(),
            limit,
            epoch: 0,
        }
    }

    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&HistoryRecord> {
        self.records.get(index)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Tag for listings requested now, see [`History::apply_listing_from`]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Wrap a fresh result for persisting
    pub fn record_for(result: TranslationResult) -> HistoryRecord {
        HistoryRecord {
            id: Uuid::new_v4().to_string(),
            result,
        }
    }

    pub async fn refresh(&mut self, store: &dyn HistoryStore) {
        let listing = store.list(self.limit).await;
        self.apply_listing(listing);
    }

    /// Replace the list with a store listing; a failed listing leaves it empty
    pub fn apply_listing(&mut self, listing: Result<Vec<HistoryRecord>, HistoryError>) {
        match listing {
            Ok(mut records) => {
                records.truncate(self.limit);
                tracing::debug!("History refreshed: {} records", records.len());
                self.records = records;
            }
            Err(e) => {
                tracing::warn!("Failed to fetch history: {e}");
                self.records.clear();
            }
        }
    }

    /// Apply a listing requested at `epoch`; listings that predate a clear
    /// are dropped so cleared records never come back.
    pub fn apply_listing_from(
        &mut self,
        epoch: u64,
        listing: Result<Vec<HistoryRecord>, HistoryError>,
    ) -> bool {
        if epoch != self.epoch {
            tracing::debug!("Dropping history listing from before the last clear");
            return false;
        }
        self.apply_listing(listing);
        true
    }

    /// Empty the local list, then clear the store in the background.
    ///
    /// The list stays empty whatever the store answers; failures are only
    /// logged.
    pub fn clear(&mut self, store: Arc<dyn HistoryStore>) -> JoinHandle<()> {
        self.records.clear();
        self.epoch += 1;
        tokio::spawn(async move {
            match store.clear().await {
                Ok(()) => tracing::info!("History cleared"),
                Err(e) => tracing::warn!("Failed to clear history: {e}"),
            }
        })
    }
}

/// Persist a fresh record and fetch the updated listing
pub async fn save_and_list(
    store: &dyn HistoryStore,
    record: &HistoryRecord,
    limit: usize,
) -> Result<Vec<HistoryRecord>, HistoryError> {
    if let Err(e) = store.append(record).await {
        tracing::warn!("Failed to save translation to history: {e}");
    }
    store.list(limit).await
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::Utc;
    use lingo_types::LanguagePair;

    use super::*;

    #[derive(Default)]
    struct FakeStore {
        records: Mutex<Vec<HistoryRecord>>,
        failing: bool,
    }

    impl FakeStore {
        fn failing() -> Self {
            Self {
                failing: true,
                ..Default::default()
            }
        }

        fn check(&self) -> Result<(), HistoryError> {
            if self.failing {
                Err(HistoryError::Backend("store unavailable".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait::async_trait]
    impl HistoryStore for FakeStore {
        async fn list(&self, limit: usize) -> Result<Vec<HistoryRecord>, HistoryError> {
            self.check()?;
            let records = self.records.lock().unwrap();
            Ok(records.iter().rev().take(limit).cloned().collect())
        }

        async fn append(&self, record: &HistoryRecord) -> Result<(), HistoryError> {
            self.check()?;
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }

        async fn clear(&self) -> Result<(), HistoryError> {
            self.check()?;
            self.records.lock().unwrap().clear();
            Ok(())
        }
    }

    fn result(text: &str) -> TranslationResult {
        TranslationResult {
            main_translation: text.to_uppercase(),
            alternatives: vec![],
            source_pair: LanguagePair::new("en", "de"),
            source_text: text.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn saved_record_shows_up_in_listing() {
        let store = FakeStore::default();
        let first = History::record_for(result("one"));
        save_and_list(&store, &first, 20).await.unwrap();

        let second = History::record_for(result("two"));
        let listing = save_and_list(&store, &second, 20).await;

        let mut history = History::new(20);
        history.apply_listing(listing);
        assert_eq!(history.records().len(), 2);
        assert_eq!(history.get(0).unwrap().id, second.id);
    }

    #[tokio::test]
    async fn failed_listing_leaves_history_empty() {
        let mut history = History::new(20);
        history.apply_listing(Ok(vec![History::record_for(result("one"))]));
        assert!(!history.is_empty());

        history.refresh(&FakeStore::failing()).await;
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn listing_is_capped_at_limit() {
        let mut history = History::new(1);
        history.apply_listing(Ok(vec![
            History::record_for(result("one")),
            History::record_for(result("two")),
        ]));
        assert_eq!(history.records().len(), 1);
        assert_eq!(history.records()[0].result.source_text, "one");
    }

    #[tokio::test]
    async fn clear_is_optimistic() {
        let mut history = History::new(20);
        history.apply_listing(Ok(vec![History::record_for(result("one"))]));

        history.clear(Arc::new(FakeStore::failing())).await.unwrap();
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn listing_from_before_clear_is_dropped() {
        let mut history = History::new(20);
        let before = history.epoch();
        let listing = Ok(vec![History::record_for(result("one"))]);

        history.clear(Arc::new(FakeStore::default())).await.unwrap();
        assert!(!history.apply_listing_from(before, listing));
        assert!(history.is_empty());

        let fresh = Ok(vec![History::record_for(result("two"))]);
        assert!(history.apply_listing_from(history.epoch(), fresh));
        assert_eq!(history.records()[0].result.source_text, "two");
    }

    #[tokio::test]
    async fn clear_empties_the_store() {
        let store = Arc::new(FakeStore::default());
        save_and_list(store.as_ref(), &History::record_for(result("one")), 20)
            .await
            .unwrap();

        let mut history = History::new(20);
        history.refresh(store.as_ref()).await;
        history.clear(store.clone()).await.unwrap();

        assert!(store.list(20).await.unwrap().is_empty());
    }
}
