use anyhow::{Context, Result, bail};
use std::path::Path;

use crate::config::ConsoleConfig;
use crate::output;
use crate::store::JsonFileStore;
use console_forms::{ConsoleContext, ModelForm};
use console_ir::ModelDraftDocument;

pub async fn run(
    ctx: &mut ConsoleContext,
    store: &JsonFileStore,
    config: &ConsoleConfig,
    path: &Path,
    submit: bool,
) -> Result<()> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading model draft {}", path.display()))?;
    let document: ModelDraftDocument = serde_json::from_str(&content)
        .with_context(|| format!("parsing model draft {}", path.display()))?;
    let draft = document.into_draft(&config.default_languages)?;

    let directory = ctx.access_roles(store).await?;
    let mut result = draft.validate();
    if !directory.is_empty() {
        result.merge(draft.check_access(&directory));
    }

    output::header(&format!("Model draft: {}", draft.title()));
    println!(
        "languages {}  {} field(s)",
        output::languages(draft.languages()),
        draft.fields().len()
    );
    output::diagnostics(&result);

    if result.has_errors() {
        bail!("model draft has {} problem(s)", result.errors.len());
    }
    output::success("Model draft is valid");

    if !submit {
        return output::json(&draft.to_payload());
    }

    let mut form = ModelForm::with_draft(draft, config.default_languages.clone());
    let model = form.submit(ctx, store).await?;
    output::success(&format!("Created model {} ({})", model.title, model.id));
    Ok(())
}
