//! docscout CLI — the main entry point.
//!
//! Commands:
//! - `serve`    — Run the MCP server on stdio
//! - `analyze`  — Analyze one Go file and print the report
//! - `doctor`   — Diagnose configuration and toolchain
//! - `config`   — Show, locate, validate or initialize configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use docscout_core::FailurePolicy;

mod commands;

#[derive(Parser)]
#[command(
    name = "docscout",
    about = "docscout — go doc lookups for the external symbols a Go file uses",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the MCP server over stdin/stdout
    Serve {
        /// Override the default model
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Analyze a Go source file and print documentation for its external symbols
    Analyze {
        /// Go source file
        file: PathBuf,

        /// Module root; discovered from the file when omitted
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Model used to propose lookups
        #[arg(short, long)]
        model: Option<String>,

        /// What to do with failed lookups: annotate or drop
        #[arg(long)]
        policy: Option<FailurePolicy>,
    },

    /// Diagnose configuration and toolchain
    Doctor,

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the default configuration
    Default,
    /// Print the effective configuration with secrets masked
    Show,
    /// Print the config file path
    Path,
    /// Validate the config file
    Validate,
    /// Write the default config file if none exists
    Init,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr: stdout carries the MCP stream and the report.
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Serve { model } => commands::serve::run(model).await?,
        Commands::Analyze {
            file,
            root,
            model,
            policy,
        } => commands::analyze::run(file, root, model, policy).await?,
        Commands::Doctor => commands::doctor::run().await?,
        Commands::Config { action } => match action.unwrap_or(ConfigAction::Default) {
            ConfigAction::Default => commands::config_cmd::print_default().await?,
            ConfigAction::Show => commands::config_cmd::show().await?,
            ConfigAction::Path => commands::config_cmd::path().await?,
            ConfigAction::Validate => commands::config_cmd::validate().await?,
            ConfigAction::Init => commands::config_cmd::init().await?,
        },
    }

    Ok(())
}
