//! Command tests through the library entry point

use clap::Parser;
use console_cli::{Cli, ConsoleConfig, JsonFileStore, run};
use console_forms::RemoteStore;
use std::fs;
use std::path::Path;

const MODELS: &str = r#"[
  {
    "_id": "counter",
    "title": "Counter",
    "value_localization": ["ky"],
    "data": {
      "count": {"name": {"ky": "Саны"}, "type": "integer", "access": ["r1"]}
    }
  }
]"#;

fn cli(dir: &Path, args: &[&str]) -> Cli {
    let models = dir.join("models.json");
    let outbox = dir.join("outbox.jsonl");
    let config = dir.join("none.toml");
    let mut argv = vec![
        "model-console".to_string(),
        "--config".to_string(),
        config.display().to_string(),
        "--models-file".to_string(),
        models.display().to_string(),
        "--access-file".to_string(),
        dir.join("access.json").display().to_string(),
        "--instances-file".to_string(),
        dir.join("instances.json").display().to_string(),
        "--outbox-file".to_string(),
        outbox.display().to_string(),
    ];
    argv.extend(args.iter().map(|a| a.to_string()));
    Cli::try_parse_from(argv).unwrap()
}

fn store(dir: &Path) -> JsonFileStore {
    JsonFileStore::new(&ConsoleConfig {
        models_path: dir.join("models.json"),
        access_path: dir.join("access.json"),
        instances_path: dir.join("instances.json"),
        outbox_path: dir.join("outbox.jsonl"),
        ..ConsoleConfig::default()
    })
}

#[tokio::test]
async fn fill_submit_creates_instance() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("models.json"), MODELS).unwrap();
    let answers = dir.path().join("answers.json");
    fs::write(&answers, r#"{"count": 0}"#).unwrap();

    let args = [
        "fill",
        "--model",
        "counter",
        "--title",
        "Zero",
        "--answers",
        answers.to_str().unwrap(),
        "--submit",
    ];
    run(cli(dir.path(), &args)).await.unwrap();

    let instances = store(dir.path()).list_instances().await.unwrap();
    assert_eq!(instances.len(), 1);
    assert_eq!(instances[0].title, "Zero");
    assert_eq!(instances[0].data["count"].value.as_integer(), Some(0));
    assert_eq!(instances[0].value_localization.codes(), "ky");
}

#[tokio::test]
async fn fill_rejects_negative_raw_number() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("models.json"), MODELS).unwrap();
    let answers = dir.path().join("answers.json");
    fs::write(&answers, r#"{"count": "-1"}"#).unwrap();

    let args = [
        "fill",
        "--model",
        "counter",
        "--title",
        "Negative",
        "--answers",
        answers.to_str().unwrap(),
        "--submit",
    ];
    let err = run(cli(dir.path(), &args)).await.unwrap_err();
    assert!(err.to_string().contains("count"));
    assert!(!dir.path().join("outbox.jsonl").exists());
}

#[tokio::test]
async fn remove_model_soft_deletes() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("models.json"), MODELS).unwrap();

    run(cli(dir.path(), &["remove-model", "counter"]))
        .await
        .unwrap();

    let models = store(dir.path()).list_models().await.unwrap();
    assert_eq!(models.len(), 1);
    assert!(models[0].removed);
}

#[tokio::test]
async fn check_model_uses_configured_default_languages() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("console.toml");
    fs::write(&config, "default_languages = [\"en\"]\n").unwrap();
    let draft = dir.path().join("draft.json");
    fs::write(
        &draft,
        r#"{"title": "Card", "fields": [{"key": "n", "name": {"en": "Number"}, "type": "integer", "access": ["r1"]}]}"#,
    )
    .unwrap();

    let mut cli = cli(dir.path(), &["check-model", draft.to_str().unwrap(), "--submit"]);
    cli.config = config;
    run(cli).await.unwrap();

    let models = store(dir.path()).list_models().await.unwrap();
    assert_eq!(models.len(), 1);
    assert_eq!(models[0].languages.codes(), "en");
    assert!(models[0].has_field("n"));
}

#[tokio::test]
async fn missing_answers_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("models.json"), MODELS).unwrap();

    let args = [
        "fill",
        "--model",
        "counter",
        "--title",
        "x",
        "--answers",
        "/nonexistent/answers.json",
    ];
    let err = run(cli(dir.path(), &args)).await.unwrap_err();
    assert!(err.to_string().contains("reading answers"));
}
