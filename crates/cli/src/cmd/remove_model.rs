use anyhow::Result;

use crate::output;
use crate::store::JsonFileStore;
use console_forms::ConsoleContext;

pub async fn run(ctx: &mut ConsoleContext, store: &JsonFileStore, id: &str) -> Result<()> {
    let model = ctx.remove_model(store, id).await?;
    output::success(&format!("Removed model {} ({})", model.title, model.id));
    Ok(())
}
