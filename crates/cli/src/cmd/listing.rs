use anyhow::Result;

use crate::output;
use crate::store::JsonFileStore;
use console_forms::ConsoleContext;
use console_ir::Model;

pub async fn models(ctx: &mut ConsoleContext, store: &JsonFileStore, all: bool) -> Result<()> {
    let catalog = ctx.models(store).await?;
    let rows: Vec<&Model> = if all {
        catalog.iter().collect()
    } else {
        catalog.active().collect()
    };

    output::header("Models");
    if rows.is_empty() {
        println!("{}", output::dim("no models"));
        return Ok(());
    }

    for model in rows {
        let mut line = format!(
            "{}  {}  {}  {} field(s)",
            model.id,
            model.title,
            output::languages(&model.languages),
            model.field_count()
        );
        if !model.is_active {
            line.push_str(&format!("  {}", output::tag("inactive")));
        }
        if model.removed {
            line.push_str(&format!("  {}", output::tag("removed")));
        }
        println!("{}", line);
    }
    Ok(())
}

pub async fn access(ctx: &mut ConsoleContext, store: &JsonFileStore) -> Result<()> {
    let directory = ctx.access_roles(store).await?;

    output::header("Access roles");
    if directory.is_empty() {
        println!("{}", output::dim("no access roles"));
        return Ok(());
    }
    for role in directory.iter() {
        println!("{}  {}", role.id, role.role);
    }
    Ok(())
}

pub async fn instances(ctx: &mut ConsoleContext, store: &JsonFileStore) -> Result<()> {
    let listing = ctx.instances(store).await?;

    output::header("Instances");
    let mut shown = 0;
    for instance in listing.visible() {
        shown += 1;
        println!(
            "{}  {}  model: {}  v{}  {}",
            instance.id,
            instance.title,
            instance.parent_title().unwrap_or("-"),
            instance.version,
            output::languages(&instance.value_localization)
        );
    }
    if shown == 0 {
        println!("{}", output::dim("no instances"));
    }
    Ok(())
}
