use crate::events::{AppEvent, EventContext};
use crate::state::ClientState;

pub async fn handle_pair_edit(
    ctx: &EventContext,
    client: &mut ClientState,
    source: Option<String>,
    target: Option<String>,
) -> anyhow::Result<()> {
    for code in source.iter().chain(target.iter()) {
        if !client.catalog.is_empty() && !client.catalog.contains(code) {
            ctx.show(AppEvent::Notice(format!("Unknown language code: {code}")))
                .await?;
        }
    }

    if let Some(code) = source {
        client.session.set_source(code);
    }
    if let Some(code) = target {
        client.session.set_target(code);
    }

    ctx.show_session(client).await
}

pub async fn handle_swap(ctx: &EventContext, client: &mut ClientState) -> anyhow::Result<()> {
    client.session.swap_languages();
    ctx.show_session(client).await
}

/// List languages, fetching them again if the startup fetch failed
pub async fn handle_languages(ctx: &EventContext, client: &mut ClientState) -> anyhow::Result<()> {
    if client.catalog.is_empty() {
        let languages = ctx.state.languages.clone();
        let tx = ctx.loopback_tx.clone();
        tokio::spawn(async move {
            let fetched = languages.fetch().await;
            if let Err(e) = tx.send(AppEvent::CatalogLoaded(fetched)).await {
                tracing::error!("Failed to deliver language list: {e}");
            }
        });
        return ctx
            .show(AppEvent::Notice("Fetching languages, try again shortly".to_string()))
            .await;
    }

    let languages = client
        .catalog
        .languages()
        .map(|(code, name)| (code.to_string(), name.to_string()))
        .collect();
    ctx.show(AppEvent::ShowLanguages(languages)).await
}
