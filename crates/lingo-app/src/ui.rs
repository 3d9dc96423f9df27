use std::io::Write;

use kanal::AsyncReceiver;
use tokio_util::sync::CancellationToken;

use crate::events::AppEvent;
use crate::render::{render_history, render_languages, render_session};

/// Prints everything the event loop sends towards the user
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let interactive = atty::is(atty::Stream::Stdout);
    print_events(&app_to_ui_rx, &cancel, &mut std::io::stdout(), interactive).await
}

async fn print_events<W: Write>(
    app_to_ui_rx: &AsyncReceiver<AppEvent>,
    cancel: &CancellationToken,
    out: &mut W,
    interactive: bool,
) -> anyhow::Result<()> {
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = app_to_ui_rx.recv() => event?,
        };
        print_event(out, event, interactive)?;
    }

    // Views queued before shutdown still reach the user
    while let Ok(Some(event)) = app_to_ui_rx.try_recv() {
        print_event(out, event, false)?;
    }
    out.flush()?;

    Ok(())
}

fn print_event<W: Write>(out: &mut W, event: AppEvent, prompt: bool) -> anyhow::Result<()> {
    let text = match event {
        AppEvent::ShowSession(view) => render_session(&view),
        AppEvent::ShowHistory(records) => render_history(&records),
        AppEvent::ShowLanguages(languages) => render_languages(&languages),
        AppEvent::ShowHelp(help) => format!("{help}\n"),
        AppEvent::Notice(notice) => format!("{notice}\n"),
        _ => return Ok(()),
    };

    write!(out, "{text}")?;
    if prompt {
        write!(out, "> ")?;
    }
    out.flush()?;
    Ok(())
}
