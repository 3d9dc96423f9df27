use lingo_history::HistoryError;
use lingo_types::HistoryRecord;

use crate::events::{AppEvent, EventContext};
use crate::state::ClientState;

pub fn handle_history_loaded(
    client: &mut ClientState,
    epoch: u64,
    listing: Result<Vec<HistoryRecord>, HistoryError>,
) {
    client.history.apply_listing_from(epoch, listing);
}

/// Show a past translation; `index` is 1-based as listed
pub async fn handle_load(
    ctx: &EventContext,
    client: &mut ClientState,
    index: usize,
) -> anyhow::Result<()> {
    let Some(record) = index
        .checked_sub(1)
        .and_then(|i| client.history.get(i))
        .cloned()
    else {
        return ctx
            .show(AppEvent::Notice(format!("No history entry {index}")))
            .await;
    };

    tracing::debug!("Loading history record {}", record.id);
    client.session.load_from_history(&record);
    ctx.show_session(client).await
}

pub async fn handle_clear(ctx: &EventContext, client: &mut ClientState) -> anyhow::Result<()> {
    // Detached: the outcome is only logged
    let _ = client.history.clear(ctx.state.history_store.clone());
    ctx.show(AppEvent::Notice("History cleared".to_string()))
        .await
}
