// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// A thin adapter between a terminal and the ResolutionEngine:
// it turns text into a Turn, prints the TurnReply, and keeps the
// ConversationState between turns of a chat session. All
// decisions are delegated to Layer 2.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};

use crate::application::generate_use_case::GenerateUseCase;
use crate::application::resolve_use_case::{ResolutionEngine, Turn, TurnReply};
use crate::domain::state::ConversationState;
use crate::domain::topic::TopicSuggestion;
use crate::infra::config::EngineConfig;
use crate::matching::question_store::LoadStatus;
use commands::{AskArgs, ChatArgs, Commands, GenerateArgs};

#[derive(Parser, Debug)]
#[command(
    name = "campus-faq",
    version,
    about = "Answer university admission, fee, hostel and placement questions from a curated FAQ."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Ask(args)      => run_ask(args),
            Commands::Chat(args)     => run_chat(args),
            Commands::Generate(args) => run_generate(args),
        }
    }
}

fn build_engine(cfg: &EngineConfig) -> Result<ResolutionEngine> {
    let (engine, status) = ResolutionEngine::from_config(cfg)?;
    if let LoadStatus::Unavailable { .. } = status {
        // Already logged by the store; answers come from keywords only
        println!("(FAQ table unavailable, using keyword answers only)");
    }
    Ok(engine)
}

fn run_ask(args: AskArgs) -> Result<()> {
    let engine = build_engine(&args.source.engine_config()?)?;

    let state = match &args.state {
        Some(json) => serde_json::from_str::<ConversationState>(json)
            .context("--state must be a JSON conversation state")?,
        None => ConversationState::new(),
    };

    let mut turn = Turn::new(args.question);
    if let Some(intent) = args.intent {
        turn = turn.with_intent(intent);
    }

    let reply = engine.handle_turn(&turn, state);
    print_reply(&reply);
    println!("\nstate: {}", serde_json::to_string(&reply.state)?);
    Ok(())
}

fn run_chat(args: ChatArgs) -> Result<()> {
    let engine = build_engine(&args.source.engine_config()?)?;
    let mut state = ConversationState::new();

    println!("Ask about admissions, fees, hostel or placements.");
    println!("Commands: ':reload' re-reads the FAQ, ':reset' starts over, 'exit' quits.");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    prompt(&mut stdout)?;

    for line in stdin.lock().lines() {
        let line = line?;
        match line.trim() {
            "exit" | "quit" => break,
            ":reload" => match engine.reload() {
                LoadStatus::Loaded { rows } => println!("Reloaded {rows} questions."),
                LoadStatus::Unavailable { reason } => println!("Reload failed: {reason}"),
            },
            ":reset" => {
                state = ConversationState::new();
                println!("Conversation cleared.");
            }
            _ => {
                let reply = engine.handle_turn(&Turn::new(line.as_str()), state);
                print_reply(&reply);
                state = reply.state;
            }
        }
        prompt(&mut stdout)?;
    }

    Ok(())
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let cfg = args.generate_config()?;
    let out = cfg.out_path.clone();

    let set = GenerateUseCase::new(cfg).execute()?;
    println!(
        "Generated {} intents ({} examples) into '{}'",
        set.intents.len(),
        set.total_examples(),
        out
    );
    Ok(())
}

fn prompt(stdout: &mut io::Stdout) -> Result<()> {
    print!("\n> ");
    stdout.flush()?;
    Ok(())
}

fn print_reply(reply: &TurnReply) {
    let response = &reply.outcome.response;

    println!("\n{}", response.text);
    if let Some(hint) = &response.hint {
        println!("{hint}");
    }
    if let Some(prompt) = &response.prompt {
        println!("{prompt}");
    }
    print_buttons(&response.buttons);

    if let Some(followup) = &reply.followup {
        if let Some(prompt) = &followup.prompt {
            println!("\n{prompt}");
        }
        print_buttons(&followup.suggestions);
    }
}

fn print_buttons(buttons: &[TopicSuggestion]) {
    for b in buttons {
        println!("  [{}] {}", b.payload(), b.label);
    }
}
