//! Offline allowlist administration CLI
//!
//! Applies a single `allowlist` command to the persisted document and
//! prints the resulting feedback. Runs outside the host process, so filter
//! types that capture attributes of a live player (`ip`, `uuid`, `all` in
//! the pattern shape) report an explicit error here.

use allowgate::{
    AllowEntry, AllowListFile, CommandProcessor, EntryShape, Feedback, OfflineRegistry,
    SharedAllowList,
    config::{LogFormat, load_config},
};
use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Offline administration for the allowgate allowlist document
#[derive(Parser, Debug)]
#[command(name = "allowgate")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "ALLOWGATE_CONFIG")]
    config: Option<String>,

    /// Override the allowlist document path from the configuration
    #[arg(short, long, env = "ALLOWGATE_FILE")]
    file: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "ALLOWGATE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Command tokens, e.g. `add name Alice`, `remove Alice`, `list`,
    /// `enable`, `disable`, `reload`
    #[arg(required = true, trailing_var_arg = true)]
    command: Vec<String>,
}

fn run_command<E: AllowEntry>(file: AllowListFile, tokens: &[&str]) -> anyhow::Result<Feedback> {
    let list = Arc::new(
        SharedAllowList::<E>::bootstrap(file).context("failed to open allowlist document")?,
    );
    let processor = CommandProcessor::new(list, Arc::new(OfflineRegistry));
    Ok(processor.handle(tokens))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration first: it carries the logging defaults.
    let config = load_config(args.config.as_deref())
        .inspect_err(|e| eprintln!("Failed to load configuration: {e}"))?;

    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    match config.logging.format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(filter)
            .init(),
    }

    let path = args
        .file
        .clone()
        .unwrap_or_else(|| config.allowlist.resolved_path());
    let file = AllowListFile::new(path);

    let tokens: Vec<&str> = args.command.iter().map(String::as_str).collect();
    let feedback = match config.allowlist.shape {
        EntryShape::Pattern => {
            run_command::<allowgate::PatternEntry>(file, &tokens)
                .inspect_err(|e| error!(error = %e, "Command failed"))?
        }
        EntryShape::Typed => {
            run_command::<allowgate::TypedEntry>(file, &tokens)
                .inspect_err(|e| error!(error = %e, "Command failed"))?
        }
    };

    match feedback {
        Feedback::Success(text) | Feedback::Info(text) => {
            println!("{text}");
            Ok(())
        }
        Feedback::Error(text) => {
            eprintln!("{text}");
            std::process::exit(1);
        }
    }
}
