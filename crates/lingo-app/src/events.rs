use std::collections::BTreeMap;
use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use lingo_core::CatalogError;
use lingo_history::HistoryError;
use lingo_translator::TranslateError;
use lingo_types::{HistoryRecord, LanguageCode, TranslationResult};
use tokio_util::sync::CancellationToken;

use crate::command::{Command, HELP};
use crate::state::{AppState, ClientState, SessionView};

pub mod history;
pub mod language;
pub mod select;
pub mod submit;

use history::{handle_clear, handle_history_loaded, handle_load};
use language::{handle_languages, handle_pair_edit, handle_swap};
use select::{handle_pick, handle_select};
use submit::{handle_shortcut, handle_submit, handle_translation_finished};

#[derive(Debug)]
pub enum AppEvent {
    /// Raw line from the prompt
    Input(String),
    InputClosed,
    TranslationFinished {
        generation: u64,
        outcome: Result<TranslationResult, TranslateError>,
    },
    /// Listing requested at history `epoch`
    HistoryLoaded {
        epoch: u64,
        listing: Result<Vec<HistoryRecord>, HistoryError>,
    },
    CatalogLoaded(Result<BTreeMap<LanguageCode, String>, CatalogError>),

    ShowSession(SessionView),
    ShowHistory(Vec<HistoryRecord>),
    ShowLanguages(Vec<(String, String)>),
    ShowHelp(&'static str),
    /// Non-blocking status or warning line
    Notice(String),
}

/// Outbound half plus a handle back into the event loop for spawned work
pub struct EventContext {
    pub state: Arc<AppState>,
    pub app_to_ui_tx: AsyncSender<AppEvent>,
    pub loopback_tx: AsyncSender<AppEvent>,
}

impl EventContext {
    pub async fn show(&self, event: AppEvent) -> anyhow::Result<()> {
        self.app_to_ui_tx.send(event).await?;
        Ok(())
    }

    pub async fn show_session(&self, client: &ClientState) -> anyhow::Result<()> {
        self.show(AppEvent::ShowSession(client.view())).await
    }
}

/// App's main loop
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut client = {
        let config = state.config.read().await;
        ClientState::new(&config)
    };

    let ctx = EventContext {
        state: state.clone(),
        app_to_ui_tx,
        loopback_tx: ui_to_app_tx,
    };

    // Neither failure blocks the session
    tokio::join!(
        client.history.refresh(state.history_store.as_ref()),
        client.catalog.refresh(state.languages.as_ref()),
    );
    if let Some(warning) = client.catalog.warning() {
        ctx.show(AppEvent::Notice(format!("Warning: {warning}"))).await?;
    }
    ctx.show_session(&client).await?;

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = ui_to_app_rx.recv() => event?,
        };

        tracing::debug!("[EVENT_LOOP] Event received: {:?}", std::mem::discriminant(&event));
        if !handle_events(&ctx, &mut client, event).await? {
            break;
        }
    }

    tracing::info!("[EVENT_LOOP] Stopped");
    Ok(())
}

/// Returns false once the user asked to quit
async fn handle_events(
    ctx: &EventContext,
    client: &mut ClientState,
    event: AppEvent,
) -> anyhow::Result<bool> {
    match event {
        AppEvent::Input(line) => match Command::parse(&line) {
            Ok(command) => return handle_command(ctx, client, command).await,
            Err(e) => ctx.show(AppEvent::Notice(e.to_string())).await?,
        },
        AppEvent::InputClosed => {
            if client.session.is_loading() {
                tracing::info!("Input closed, waiting for the pending translation");
                client.quit_pending = true;
            } else {
                tracing::info!("Input closed");
                return Ok(false);
            }
        }
        AppEvent::TranslationFinished {
            generation,
            outcome,
        } => {
            handle_translation_finished(ctx, client, generation, outcome).await?;
            if client.quit_pending && !client.session.is_loading() {
                tracing::info!("Pending translation done, stopping");
                return Ok(false);
            }
        }
        AppEvent::HistoryLoaded { epoch, listing } => {
            handle_history_loaded(client, epoch, listing);
        }
        AppEvent::CatalogLoaded(fetched) => {
            client.catalog.apply(fetched);
            if let Some(warning) = client.catalog.warning() {
                ctx.show(AppEvent::Notice(format!("Warning: {warning}"))).await?;
            }
        }
        AppEvent::ShowSession(_)
        | AppEvent::ShowHistory(_)
        | AppEvent::ShowLanguages(_)
        | AppEvent::ShowHelp(_)
        | AppEvent::Notice(_) => {
            // UI-only events
        }
    }

    Ok(true)
}

async fn handle_command(
    ctx: &EventContext,
    client: &mut ClientState,
    command: Command,
) -> anyhow::Result<bool> {
    match command {
        Command::Submit(text) => handle_submit(ctx, client, Some(text)).await?,
        Command::Shortcut => handle_shortcut(ctx, client).await?,
        Command::EditText(text) => {
            client.session.edit_text(text);
            ctx.show_session(client).await?;
        }
        Command::Source(code) => handle_pair_edit(ctx, client, Some(code), None).await?,
        Command::Target(code) => handle_pair_edit(ctx, client, None, Some(code)).await?,
        Command::Swap => handle_swap(ctx, client).await?,
        Command::Select(index) => handle_select(ctx, client, index).await?,
        Command::Pick(text) => handle_pick(ctx, client, text).await?,
        Command::History => {
            ctx.show(AppEvent::ShowHistory(client.history.records().to_vec()))
                .await?;
        }
        Command::Load(index) => handle_load(ctx, client, index).await?,
        Command::Clear => handle_clear(ctx, client).await?,
        Command::Languages => handle_languages(ctx, client).await?,
        Command::Show => ctx.show_session(client).await?,
        Command::Help => ctx.show(AppEvent::ShowHelp(HELP)).await?,
        Command::Quit => return Ok(false),
    }

    Ok(true)
}
