//! Converge CLI - wait for application state from the shell.

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use converge_core::{Config, WaitError, CONFIG_FILE_NAME};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod snapshot;

#[derive(Parser)]
#[command(name = "converge")]
#[command(about = "Wait for background-updated application state to converge", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file
    #[arg(long, global = true, default_value = CONFIG_FILE_NAME)]
    config: PathBuf,

    /// Override the poll interval in milliseconds
    #[arg(long, global = true)]
    poll_interval: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Wait until a value in a JSON state file is non-null
    Value {
        /// JSON state file, re-read on every tick
        #[arg(short, long)]
        file: PathBuf,
        /// Dotted path to the value (e.g. downloads_page.downloads)
        #[arg(short, long)]
        path: String,
        /// Timeout in seconds (default from configuration)
        #[arg(short, long)]
        timeout: Option<u64>,
        /// Print the value once it is set
        #[arg(long)]
        print: bool,
    },
    /// Wait until a list in a JSON state file is populated
    List {
        /// JSON state file, re-read on every tick
        #[arg(short, long)]
        file: PathBuf,
        /// Dotted path to the array
        #[arg(short, long)]
        path: String,
        /// Minimum number of elements
        #[arg(long, default_value = "1")]
        min_count: usize,
        /// Object key marking a placeholder element when true
        #[arg(long, default_value = "loading")]
        placeholder_key: String,
        /// Timeout in seconds (default from configuration)
        #[arg(short, long)]
        timeout: Option<u64>,
    },
    /// Print the effective configuration
    Config,
}

fn main() -> ExitCode {
    // Respects RUST_LOG environment variable (e.g., RUST_LOG=converge_core=trace)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", style("error:").red().bold(), err);
            let wait_error = wait_error(&err);
            if let Some(tip) = wait_error.and_then(WaitError::recovery_suggestion) {
                eprintln!("  {} {}", style("Tip:").cyan(), tip);
            }
            exit_code(wait_error)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(&cli.config)?;
    if let Some(ms) = cli.poll_interval {
        config.wait.poll_interval_ms = ms;
        config.wait.validate()?;
    }

    match cli.command {
        Commands::Value {
            file,
            path,
            timeout,
            print,
        } => commands::value::run(&config.wait, &file, &path, timeout, print),
        Commands::List {
            file,
            path,
            min_count,
            placeholder_key,
            timeout,
        } => commands::list::run(
            &config.wait,
            &file,
            &path,
            min_count,
            &placeholder_key,
            timeout,
        ),
        Commands::Config => commands::config::run(&config, &cli.config),
    }
}

/// First wait error anywhere in the context chain.
fn wait_error(err: &anyhow::Error) -> Option<&WaitError> {
    err.chain().find_map(|e| e.downcast_ref::<WaitError>())
}

fn exit_code(error: Option<&WaitError>) -> ExitCode {
    ExitCode::from(exit_status(error))
}

/// 2 = timed out, 3 = the wait itself was written wrong, 1 = anything else.
fn exit_status(error: Option<&WaitError>) -> u8 {
    match error {
        Some(e) if e.is_timeout() => 2,
        Some(e) if e.is_caller_error() => 3,
        _ => 1,
    }
}
