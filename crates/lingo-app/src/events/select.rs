use crate::events::{AppEvent, EventContext};
use crate::state::ClientState;

pub async fn handle_select(
    ctx: &EventContext,
    client: &mut ClientState,
    index: usize,
) -> anyhow::Result<()> {
    if client.session.select_output(index).is_none() {
        let notice = match client.session.result() {
            Some(result) => format!(
                "No output {index}: choose 0-{}",
                result.alternatives.len()
            ),
            None => "Nothing to select yet".to_string(),
        };
        return ctx.show(AppEvent::Notice(notice)).await;
    }

    ctx.show_session(client).await
}

pub async fn handle_pick(
    ctx: &EventContext,
    client: &mut ClientState,
    text: String,
) -> anyhow::Result<()> {
    client.session.select(text);
    ctx.show_session(client).await
}
