//! Shelf CLI - documentation site on a headless CMS.
//!
//! Provides commands for:
//! - `serve`: Start the API server
//! - `version create|list`: Snapshot the docs into numbered versions
//! - `search build|query`: Build and query the static search index
//! - `reference list|show`: Inspect OpenAPI/Swagger reference files

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ReferenceCommand, SearchCommand, ServeArgs, VersionCommand};
use output::Output;

/// Application version from Cargo.toml.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shelf - documentation site on a headless CMS.
#[derive(Parser)]
#[command(name = "shelf", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server.
    Serve(ServeArgs),
    /// Content versioning commands.
    #[command(subcommand)]
    Version(VersionCommand),
    /// Search index commands.
    #[command(subcommand)]
    Search(SearchCommand),
    /// API reference commands.
    #[command(subcommand)]
    Reference(ReferenceCommand),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Serve(args) if args.verbose);

    // --verbose enables INFO level, otherwise use RUST_LOG
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Serve(args) => match tokio::runtime::Runtime::new() {
            Ok(rt) => rt.block_on(args.execute(VERSION)),
            Err(e) => Err(e.into()),
        },
        Commands::Version(cmd) => cmd.execute(),
        Commands::Search(cmd) => cmd.execute(),
        Commands::Reference(cmd) => cmd.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_version_create() {
        let cli = Cli::try_parse_from([
            "shelf", "version", "create", "2.0", "--label", "Two", "--dry-run",
        ])
        .unwrap();

        assert!(matches!(cli.command, Commands::Version(_)));
    }

    #[test]
    fn test_serve_verbose_flag() {
        let cli = Cli::try_parse_from(["shelf", "serve", "--verbose", "--port", "9000"]).unwrap();

        assert!(matches!(cli.command, Commands::Serve(args) if args.verbose));
    }
}
