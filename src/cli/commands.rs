// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Three subcommands:
//   ask      — answer one question and print the updated state
//   chat     — interactive session with its own state
//   generate — write classifier training examples
//
// Reference: Rust Book §12 (Building a CLI Program)

use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::application::generate_use_case::GenerateConfig;
use crate::infra::config::EngineConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Answer a single question
    Ask(AskArgs),

    /// Start an interactive question/answer session
    Chat(ChatArgs),

    /// Generate intent-classifier training examples from the Q/A CSV
    Generate(GenerateArgs),
}

/// Flags shared by every command that reads the Q/A source
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// CSV file with `question` and `answer` columns
    /// (overrides `qa_path` from the config file)
    #[arg(long)]
    pub qa_path: Option<String>,

    /// Optional JSON engine config
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl SourceArgs {
    /// Config file (or defaults) with the command-line overrides applied
    pub fn engine_config(&self) -> Result<EngineConfig> {
        let mut cfg = EngineConfig::load_or_default(self.config.as_deref())?;
        if let Some(path) = &self.qa_path {
            cfg.qa_path = path.clone();
        }
        Ok(cfg)
    }
}

#[derive(Args, Debug)]
pub struct AskArgs {
    /// The question to answer
    #[arg(long)]
    pub question: String,

    /// Intent label from an external classifier, e.g. `fees`
    #[arg(long)]
    pub intent: Option<String>,

    /// Conversation state from the previous turn, as JSON
    /// e.g. '{"last_topic":"fees"}'
    #[arg(long)]
    pub state: Option<String>,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Args, Debug)]
pub struct ChatArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Where to write the training examples (.yml → nlu.yml layout, else JSON)
    #[arg(long, default_value = "data/nlu.yml")]
    pub out: String,

    #[command(flatten)]
    pub source: SourceArgs,
}

impl GenerateArgs {
    pub fn generate_config(&self) -> Result<GenerateConfig> {
        let engine = self.source.engine_config()?;
        Ok(GenerateConfig {
            qa_path:  engine.qa_path,
            out_path: self.out.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qa_path_flag_overrides_default() {
        let args = SourceArgs { qa_path: Some("faq.csv".into()), config: None };
        assert_eq!(args.engine_config().unwrap().qa_path, "faq.csv");
    }

    #[test]
    fn test_generate_defaults_to_nlu_yaml() {
        use clap::Parser;

        let cli = crate::cli::Cli::try_parse_from(["campus-faq", "generate"]).unwrap();
        let Commands::Generate(args) = cli.command else {
            panic!("expected the generate command");
        };
        let cfg = args.generate_config().unwrap();
        assert_eq!(cfg.out_path, "data/nlu.yml");
        assert_eq!(cfg.qa_path, EngineConfig::default().qa_path);
    }

    #[test]
    fn test_defaults_without_flags() {
        let args = SourceArgs { qa_path: None, config: None };
        assert_eq!(args.engine_config().unwrap(), EngineConfig::default());
    }
}
