//! Command-line arguments

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Model Console - schema-driven forms for multilingual model records
#[derive(Parser, Debug, Clone)]
#[command(name = "model-console", version, about)]
pub struct Cli {
    /// Configuration file (missing file means defaults)
    #[arg(
        long,
        global = true,
        env = "MODEL_CONSOLE_CONFIG",
        default_value = "model-console.toml"
    )]
    pub config: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub paths: PathArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Overrides for the data file locations in the configuration
#[derive(Args, Debug, Clone, Default)]
pub struct PathArgs {
    /// Models listing (JSON array)
    #[arg(long = "models-file", global = true, env = "MODEL_CONSOLE_MODELS")]
    pub models: Option<PathBuf>,

    /// Access roles listing (JSON array)
    #[arg(long = "access-file", global = true, env = "MODEL_CONSOLE_ACCESS")]
    pub access: Option<PathBuf>,

    /// Instances listing (JSON array)
    #[arg(long = "instances-file", global = true, env = "MODEL_CONSOLE_INSTANCES")]
    pub instances: Option<PathBuf>,

    /// Outbox of created instances (JSON lines)
    #[arg(long = "outbox-file", global = true, env = "MODEL_CONSOLE_OUTBOX")]
    pub outbox: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List models with their languages and field counts
    Models {
        /// Include inactive and removed models
        #[arg(long)]
        all: bool,
    },

    /// List access roles
    Access,

    /// List instances that are not removed
    Instances,

    /// Validate a model draft document and print its creation payload
    CheckModel {
        /// Draft document (JSON: title, value_localization, fields)
        draft: PathBuf,

        /// Create the model in the models listing once it validates
        #[arg(long)]
        submit: bool,
    },

    /// Build an instance of a model from an answers file
    Fill {
        /// Parent model id
        #[arg(long)]
        model: String,

        /// Instance title
        #[arg(long)]
        title: String,

        /// Answers (JSON object: key -> {lang: text} or integer)
        #[arg(long)]
        answers: PathBuf,

        /// Append the instance to the outbox once it is complete
        #[arg(long)]
        submit: bool,
    },

    /// Soft-delete a model
    RemoveModel {
        /// Model id
        id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_fill() {
        let cli = Cli::try_parse_from([
            "model-console",
            "--models-file",
            "m.json",
            "fill",
            "--model",
            "person",
            "--title",
            "Someone",
            "--answers",
            "a.json",
            "--submit",
        ])
        .unwrap();

        assert_eq!(cli.paths.models, Some(PathBuf::from("m.json")));
        match cli.command {
            Command::Fill {
                model,
                title,
                submit,
                ..
            } => {
                assert_eq!(model, "person");
                assert_eq!(title, "Someone");
                assert!(submit);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_models_defaults_to_active_only() {
        let cli = Cli::try_parse_from(["model-console", "models"]).unwrap();
        assert!(matches!(cli.command, Command::Models { all: false }));
    }
}
