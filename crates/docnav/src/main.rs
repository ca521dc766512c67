//! docnav CLI - Documentation navigation builder.
//!
//! Provides commands for:
//! - `tree`: Print the navigation tree of a documentation set
//! - `check`: Validate `docset.yml` and nested `toc.yml` files
//! - `page`: Show the position of a single page in the navigation

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, PageArgs, TreeArgs};
use output::Output;

/// docnav - Documentation navigation builder.
#[derive(Parser)]
#[command(name = "docnav", version, about)]
struct Cli {
    /// Enable info-level logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the navigation tree.
    Tree(TreeArgs),
    /// Validate the table of contents and report diagnostics.
    Check(CheckArgs),
    /// Show navigation details for a page.
    Page(PageArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Tree(args) => args.execute(),
        Commands::Check(args) => args.execute(),
        Commands::Page(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
