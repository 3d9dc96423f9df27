mod accessor;
mod file;

pub use accessor::{History, save_and_list};
pub use file::FileHistoryStore;

use lingo_types::HistoryRecord;

/// Persistent translation history
#[async_trait::async_trait]
pub trait HistoryStore: Send + Sync {
    /// Most recent first, at most `limit` records
    async fn list(&self, limit: usize) -> Result<Vec<HistoryRecord>, HistoryError>;

    async fn append(&self, record: &HistoryRecord) -> Result<(), HistoryError>;

    /// Removes every record
    async fn clear(&self) -> Result<(), HistoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("history backend error: {0}")]
    Backend(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
