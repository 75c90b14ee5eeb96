use anyhow::{Context, Result, bail};
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

use crate::output;
use crate::store::JsonFileStore;
use console_core::{FieldKey, Language};
use console_forms::{
    ConsoleContext, FieldInput, InstanceDraft, InstanceForm, field_is_complete,
    form_is_submittable, incomplete_fields,
};

/// One entry of the answers file
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Answer {
    Integer(i64),
    /// Number typed as text; parsed the way the number box does
    Raw(String),
    Text(IndexMap<Language, String>),
}

pub async fn run(
    ctx: &mut ConsoleContext,
    store: &JsonFileStore,
    model_id: &str,
    title: &str,
    answers_path: &Path,
    submit: bool,
) -> Result<()> {
    let content = tokio::fs::read_to_string(answers_path)
        .await
        .with_context(|| format!("reading answers {}", answers_path.display()))?;
    let answers: IndexMap<FieldKey, Answer> = serde_json::from_str(&content)
        .with_context(|| format!("parsing answers {}", answers_path.display()))?;

    let catalog = ctx.models(store).await?;
    let mut form = InstanceForm::new();
    form.select_parent_model(&catalog, model_id);
    if form.draft().parent_model().is_none() {
        bail!("model '{}' is unknown, inactive or removed", model_id);
    }
    form.set_title(title);

    for (key, answer) in answers {
        if form.draft().field(&key).is_none() {
            output::warning(&format!("field '{}' is not part of the model; ignored", key));
            continue;
        }
        match answer {
            Answer::Text(entries) => {
                for (language, text) in entries {
                    if !form.draft().languages().contains(language) {
                        output::warning(&format!(
                            "{}: language {} is not active for this model; ignored",
                            key, language
                        ));
                        continue;
                    }
                    form.set_text(&key, language, text);
                }
            }
            Answer::Integer(n) => form.set_integer(&key, Some(n)),
            Answer::Raw(raw) => match FieldInput::parse_integer(&raw) {
                Some(input) => form.set_field_value(&key, None, input),
                None => output::warning(&format!(
                    "{}: '{}' is not a non-negative integer; ignored",
                    key, raw
                )),
            },
        }
    }

    report(form.draft());

    if !submit {
        return output::json(&form.draft().to_payload()?);
    }

    let instance = form.submit(ctx, store).await?;
    output::success(&format!(
        "Instance {} queued in {}",
        instance.id,
        store.outbox_path().display()
    ));
    Ok(())
}

fn report(draft: &InstanceDraft) {
    let preferred = draft.languages().iter().next().unwrap_or(Language::Ru);

    output::header(&format!("{} ({})", draft.title(), draft.parent_model().unwrap_or("-")));
    for (key, field) in draft.fields() {
        let name = field.definition().name.display(preferred).unwrap_or(key);
        let detail = format!(
            "{} [{}] {}",
            name,
            field.field_type(),
            field.value().summary()
        );
        output::field_status(key, field_is_complete(field), &detail);
    }

    if form_is_submittable(draft) {
        output::success("Ready to submit");
    } else if draft.title().trim().is_empty() {
        output::failure("Title is required");
    } else {
        output::failure(&format!("Incomplete: {}", incomplete_fields(draft).join(", ")));
    }
}
