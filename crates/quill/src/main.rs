//! Quill CLI - Content composition engine.
//!
//! Provides commands for:
//! - `compose`: Compose a document file into sanitized HTML
//! - `post`: Compose a stored post
//! - `posts`: List stored posts

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ComposeArgs, PostArgs, PostsArgs};
use output::Output;

/// Log level used when `RUST_LOG` is not set.
const DEFAULT_LOG_LEVEL: &str = "warn";

/// Quill - Content composition engine.
#[derive(Parser)]
#[command(name = "quill", version, about)]
struct Cli {
    /// Enable verbose output (show registry misses and pass logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose a document file and print the HTML.
    Compose(ComposeArgs),
    /// Compose a stored post and print the HTML.
    Post(PostArgs),
    /// List stored posts.
    Posts(PostsArgs),
}

/// Filter from `RUST_LOG`, falling back to WARN when unset or invalid.
fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        default_filter()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Compose(args) => args.execute(),
        Commands::Post(args) => args.execute(),
        Commands::Posts(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
