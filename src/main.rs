mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod workflow;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::extract::{self, ExtractCommandArgs};
use crate::cmd::tickets::{self, TicketsCommandArgs};
use crate::config::AppConfig;
use crate::error::AppResult;
use crate::infra::pdf::LopdfLoader;

const DEFAULT_DOCUMENT: &str = "requirements/TodoList Application.pdf";

#[derive(Parser)]
#[command(
    name = "reqtix",
    author,
    version,
    about = "Turn a PDF requirements document into project tickets"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the text extracted from a PDF document.
    Extract(ExtractArgs),
    /// Generate project tickets from a PDF requirements document.
    Tickets(TicketsArgs),
    /// Manage CLI configuration.
    Config(ConfigArgs),
}

#[derive(Args)]
struct ExtractArgs {
    /// Path to the PDF document.
    #[arg(default_value = DEFAULT_DOCUMENT)]
    path: PathBuf,
}

#[derive(Args)]
struct TicketsArgs {
    /// Path to the PDF requirements document.
    #[arg(default_value = DEFAULT_DOCUMENT)]
    path: PathBuf,
    /// Override the configured Gemini model.
    #[arg(short, long)]
    model: Option<String>,
    /// Log a summary of whether the response is a well-formed ticket list.
    #[arg(long)]
    inspect: bool,
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // `.env` must be loaded before tracing so that RUST_LOG set there applies.
    let env_file = dotenv::dotenv().ok();
    init_tracing(cli.verbose);
    if let Some(path) = env_file {
        debug!(path = %path.display(), "loaded environment file");
    }

    match cli.command {
        Commands::Config(args) => config_cmd::run(args.command),
        Commands::Extract(args) => {
            let text = extract::run(&LopdfLoader::new(), ExtractCommandArgs { path: args.path })?;
            println!("{text}");
            Ok(())
        }
        Commands::Tickets(args) => run_tickets(args).await,
    }
}

async fn run_tickets(args: TicketsArgs) -> AppResult<()> {
    let config = AppConfig::load()?.with_model_override(args.model);

    let tickets = tickets::run_with_config(
        config,
        TicketsCommandArgs {
            path: args.path,
            inspect: args.inspect,
        },
    )
    .await?;

    println!("{tickets}");
    Ok(())
}

fn init_tracing(verbosity: u8) {
    let filter = log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok(), verbosity);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// RUST_LOG wins when it parses; otherwise `-v` picks the level.
fn log_filter(directives: Option<String>, verbosity: u8) -> EnvFilter {
    let default_directive = match verbosity {
        0 => "reqtix=warn",
        1 => "reqtix=info",
        _ => "reqtix=debug",
    };
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directive))
}
