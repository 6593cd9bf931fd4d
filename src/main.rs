use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use payparse::application::engine::InstructionEngine;
use payparse::domain::ports::{EvaluationRequest, SharedInstructionService};
use payparse::interfaces::csv::account_reader::AccountReader;
use payparse::interfaces::http;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP intake surface.
    Serve {
        /// Address to bind.
        #[arg(long, default_value = "127.0.0.1:8080")]
        bind: String,
    },
    /// Evaluate a single instruction against accounts loaded from a CSV file.
    Check {
        /// The payment instruction sentence.
        instruction: String,

        /// Accounts CSV file (id,balance,currency).
        #[arg(long)]
        accounts: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve { bind } => serve(&bind).await,
        Command::Check {
            instruction,
            accounts,
        } => check(&instruction, &accounts),
    }
}

async fn serve(bind: &str) -> Result<()> {
    let service: SharedInstructionService = Arc::new(InstructionEngine::new());
    let app = http::router(service);

    let listener = tokio::net::TcpListener::bind(bind).await.into_diagnostic()?;
    tracing::info!(%bind, "payment instruction intake listening");
    axum::serve(listener, app).await.into_diagnostic()?;
    Ok(())
}

fn check(instruction: &str, accounts_path: &Path) -> Result<()> {
    let file = File::open(accounts_path).into_diagnostic()?;
    let accounts = AccountReader::new(file).accounts().into_diagnostic()?;

    let engine = InstructionEngine::new();
    let verdict = engine.evaluate(&EvaluationRequest {
        accounts,
        instruction: instruction.to_string(),
    });

    let rendered = serde_json::to_string_pretty(&verdict).into_diagnostic()?;
    println!("{rendered}");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
