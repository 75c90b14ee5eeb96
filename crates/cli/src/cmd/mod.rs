//! Subcommand implementations

use anyhow::Result;

use crate::args::{Cli, Command};
use crate::config::ConsoleConfig;
use crate::store::JsonFileStore;
use console_forms::ConsoleContext;

mod check_model;
mod fill;
mod listing;
mod remove_model;

pub async fn dispatch(cli: Cli) -> Result<()> {
    let config = ConsoleConfig::load(&cli.config)?.with_overrides(&cli.paths);
    let store = JsonFileStore::new(&config);
    let mut ctx = ConsoleContext::new();

    match cli.command {
        Command::Models { all } => listing::models(&mut ctx, &store, all).await,
        Command::Access => listing::access(&mut ctx, &store).await,
        Command::Instances => listing::instances(&mut ctx, &store).await,
        Command::CheckModel { draft, submit } => {
            check_model::run(&mut ctx, &store, &config, &draft, submit).await
        }
        Command::Fill {
            model,
            title,
            answers,
            submit,
        } => fill::run(&mut ctx, &store, &model, &title, &answers, submit).await,
        Command::RemoveModel { id } => remove_model::run(&mut ctx, &store, &id).await,
    }
}
