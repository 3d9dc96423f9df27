use std::io::BufRead;

use kanal::AsyncSender;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use crate::events::AppEvent;

/// Forward prompt lines to the event loop.
///
/// Stdin is read on a plain thread so a pending read never holds up
/// runtime shutdown.
pub async fn input_loop(
    ui_to_app_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let handle = Handle::current();

    std::thread::Builder::new()
        .name("lingo-stdin".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let event = match line {
                    Ok(line) => AppEvent::Input(line),
                    Err(e) => {
                        tracing::error!("Failed to read input: {e}");
                        break;
                    }
                };
                if handle.block_on(ui_to_app_tx.send(event)).is_err() {
                    return;
                }
            }
            let _ = handle.block_on(ui_to_app_tx.send(AppEvent::InputClosed));
        })?;

    cancel.cancelled().await;
    tracing::info!("Input loop stopping");
    Ok(())
}
