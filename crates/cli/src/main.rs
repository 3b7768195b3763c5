//! Agglomerate CLI: the main entry point.
//!
//! Commands:
//! - `build` : Merge headers and write the single-header output
//! - `check` : Verify the existing output is up to date
//! - `order` : Show roots and emission order without assembling
//! - `config`: Show or initialize `agglomerate.toml`

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;

#[derive(Parser)]
#[command(
    name = "agglomerate",
    about = "Agglomerate: merge modular C headers into one dependency-ordered header",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of ./agglomerate.toml
    #[arg(long, global = true, env = "AGGLOMERATE_CONFIG")]
    config: Option<PathBuf>,
}

/// Settings shared by commands that produce the merged header.
#[derive(Args, Debug, Default)]
pub struct Inputs {
    /// Include guard name for the merged header
    #[arg(long)]
    pub guard: Option<String>,

    /// Location to write the merged header to (`-` for stdout)
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Headers to merge (replaces `hdrs` from the config file)
    pub hdrs: Vec<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge headers into a single file
    Build(Inputs),

    /// Fail if the output is missing or differs from a fresh build
    Check(Inputs),

    /// Print root headers, emission order and external includes
    Order {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,

        /// Headers to order (replaces `hdrs` from the config file)
        hdrs: Vec<PathBuf>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,

    /// Write a default agglomerate.toml
    Init,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so `--out -` stays clean
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();
    let result = match cli.command {
        Commands::Build(inputs) => commands::build::run(config_path, inputs),
        Commands::Check(inputs) => commands::check::run(config_path, inputs),
        Commands::Order { json, hdrs } => commands::order::run(config_path, hdrs, json),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_cmd::show(config_path),
            ConfigAction::Init => commands::config_cmd::init(config_path),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
