use lingo_core::{Completion, Phase, SessionError};
use lingo_history::{History, save_and_list};
use lingo_translator::TranslateError;
use lingo_types::{MAX_TEXT_CHARS, TranslationResult};

use crate::events::{AppEvent, EventContext};
use crate::state::ClientState;

/// Translate `text` (or the current input) unless a request is in flight
pub async fn handle_submit(
    ctx: &EventContext,
    client: &mut ClientState,
    text: Option<String>,
) -> anyhow::Result<()> {
    // A rejected submit leaves the in-flight input alone
    if client.session.is_loading() {
        return ctx
            .show(AppEvent::Notice("Still translating, please wait".to_string()))
            .await;
    }

    if let Some(text) = text {
        let chars = text.chars().count();
        client.session.edit_text(text);
        if chars > MAX_TEXT_CHARS {
            ctx.show(AppEvent::Notice(format!(
                "Input cut to {MAX_TEXT_CHARS} characters ({chars} given)"
            )))
            .await?;
        }
    }

    let pending = match client.session.begin_submit_current() {
        Ok(pending) => pending,
        Err(SessionError::Busy) => {
            ctx.show(AppEvent::Notice(
                "Still translating, please wait".to_string(),
            ))
            .await?;
            return Ok(());
        }
        Err(SessionError::Validation(e)) => {
            tracing::debug!("Validation failed: {e}");
            return ctx.show_session(client).await;
        }
    };

    tracing::info!(
        "Translating {} chars {} -> {} (generation {})",
        pending.request.text.chars().count(),
        pending.request.pair.source,
        pending.request.pair.target,
        pending.generation
    );

    let translator = ctx.state.translator.clone();
    let tx = ctx.loopback_tx.clone();
    tokio::spawn(async move {
        let outcome = translator
            .translate(&pending.request.text, &pending.request.pair)
            .await;
        if let Err(e) = tx
            .send(AppEvent::TranslationFinished {
                generation: pending.generation,
                outcome,
            })
            .await
        {
            tracing::error!("Failed to deliver translation result: {e}");
        }
    });

    ctx.show_session(client).await
}

/// Bare Enter only fires while there is something to translate
pub async fn handle_shortcut(ctx: &EventContext, client: &mut ClientState) -> anyhow::Result<()> {
    if client.session.can_submit() {
        handle_submit(ctx, client, None).await
    } else {
        tracing::debug!("Submit shortcut ignored");
        Ok(())
    }
}

pub async fn handle_translation_finished(
    ctx: &EventContext,
    client: &mut ClientState,
    generation: u64,
    outcome: Result<TranslationResult, TranslateError>,
) -> anyhow::Result<()> {
    if client.session.finish(generation, outcome) == Completion::Stale {
        return Ok(());
    }

    if let (Phase::Result, Some(result)) = (client.session.phase(), client.session.result()) {
        refresh_history_after(
            ctx,
            result.clone(),
            client.history.limit(),
            client.history.epoch(),
        );
    }

    ctx.show_session(client).await
}

/// Save the new result and reload the listing, concurrently with the UI
fn refresh_history_after(
    ctx: &EventContext,
    result: TranslationResult,
    limit: usize,
    epoch: u64,
) {
    let store = ctx.state.history_store.clone();
    let tx = ctx.loopback_tx.clone();
    tokio::spawn(async move {
        let record = History::record_for(result);
        let listing = save_and_list(store.as_ref(), &record, limit).await;
        if let Err(e) = tx.send(AppEvent::HistoryLoaded { epoch, listing }).await {
            tracing::error!("Failed to deliver history listing: {e}");
        }
    });
}
