//! KubeAI - Entry Point
//!
//! Reads natural language queries from the terminal, answers them against
//! the configured cluster, and keeps going until the user leaves.

use clap::Parser;
use kubeai::assistant::{Assistant, Stage, TurnError};
use kubeai::cluster::KubeConnector;
use kubeai::command::{CommandExecutor, CommandRegistry};
use kubeai::core::config::AppConfig;
use kubeai::core::error::{ErrorKind, KubeAiError, Result};
use kubeai::llm::client::LlmClient;

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Builder;
use tracing_subscriber::EnvFilter;

/// KubeAI - ask your cluster questions in plain language
#[derive(Parser, Debug)]
#[command(name = "kubeai")]
#[command(about = "Natural language front end for inspecting Kubernetes workloads")]
struct Args {
    /// TOML configuration file (environment variables override it)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Debug-level logging unless RUST_LOG says otherwise
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "kubeai=debug" } else { "kubeai=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();

    let config = AppConfig::load(args.config.as_deref())?;
    let llm = LlmClient::from_settings(&config.llm)?;
    tracing::info!(model = llm.model(), "KubeAI starting...");

    // One query at a time: a single-threaded runtime, blocked on per turn
    let rt = Builder::new_current_thread().enable_all().build()?;

    let connector = Arc::new(KubeConnector::new(config.cluster.clone()));
    let registry = CommandRegistry::with_default_handlers(connector);
    tracing::info!(intents = ?registry.intents(), "Command registry ready");

    let mut assistant = Assistant::new(Arc::new(llm), CommandExecutor::new(registry));
    tracing::debug!(session = %assistant.session().session_id, "Session started");

    println!("Welcome to KubeAI CLI!");
    println!("Type your query, or 'exit' to quit.");

    loop {
        print!("kubeai> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            println!("\nExiting KubeAI CLI.");
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            println!("Goodbye!");
            break;
        }

        let outcome = rt.block_on(assistant.handle(input, |intent| {
            println!("Recognized intent: {}", intent.name);
            println!("Entities: {:?}", intent.entities);
        }));

        match &outcome {
            Ok(turn) => {
                println!("\n--- Response ---");
                println!("{}", turn.response);
                println!("---------------\n");
            }
            Err(err) => report(err),
        }
    }

    tracing::info!(
        turns = assistant.session().history.len(),
        "Session finished"
    );
    Ok(())
}

/// Print a failed turn, labelled by stage and error kind
fn report(err: &TurnError) {
    match (err.stage, err.error.kind()) {
        (Stage::Recognition, _) => {
            println!("[NLP Error] Could not recognize intent: {}", err.error)
        }
        (_, ErrorKind::Configuration) => println!("[Kubeconfig Error] {}", err.error),
        (Stage::Execution, _) => match &err.error {
            KubeAiError::Execution { .. } | KubeAiError::UnimplementedIntent(_) => {
                println!("[Command Error] {}", err.error)
            }
            other => println!("[Command Error] Unexpected error: {}", other),
        },
        (Stage::Response, _) => {
            println!("[Response Error] Could not generate response: {}", err.error)
        }
    }
}
