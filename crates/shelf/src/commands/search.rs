//! `shelf search` subcommands.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Subcommand};
use shelf_cms::{CmsClient, ContentBackend};
use shelf_search::{SearchClient, SearchOutcome};
use shelf_site::{Site, SiteOptions};

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Search index commands.
#[derive(Subcommand)]
pub(crate) enum SearchCommand {
    /// Build the static search index from the CMS.
    Build(BuildArgs),
    /// Query a built search index.
    Query(QueryArgs),
}

impl SearchCommand {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        match self {
            Self::Build(args) => args.execute(),
            Self::Query(args) => args.execute(),
        }
    }
}

/// Arguments for `search build`.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Output file (default: search index path from config).
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    config: ConfigArgs,
}

impl BuildArgs {
    fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.config.load()?;
        let backend: Arc<dyn ContentBackend> =
            Arc::new(CmsClient::from_endpoint(&config.require_cms()?));
        let site = Site::new(backend, SiteOptions::from_config(&config));

        let index = site.build_search_index()?;
        let path = self
            .output
            .unwrap_or_else(|| config.search_resolved.index_path.clone());
        index.write(&path)?;

        output.success(&format!(
            "Indexed {} pages into {}",
            index.len(),
            path.display()
        ));
        Ok(())
    }
}

/// Arguments for `search query`.
#[derive(Args)]
pub(crate) struct QueryArgs {
    /// Search terms.
    query: String,

    /// Index file (default: search index path from config).
    #[arg(short, long)]
    index: Option<PathBuf>,

    /// Maximum number of results (default: from config).
    #[arg(short, long)]
    limit: Option<usize>,

    #[command(flatten)]
    config: ConfigArgs,
}

impl QueryArgs {
    fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.config.load()?;
        let path = self
            .index
            .unwrap_or_else(|| config.search_resolved.index_path.clone());
        if !path.exists() {
            return Err(CliError::Validation(format!(
                "Search index not found: {} (run `shelf search build`)",
                path.display()
            )));
        }

        let limit = self.limit.unwrap_or(config.search_resolved.max_results);
        let client = SearchClient::from_path(path, limit);

        match client.search(&self.query) {
            SearchOutcome::Idle => output.info("Empty query"),
            SearchOutcome::NoResults { query } => {
                output.warning(&format!("No results for '{query}'"));
            }
            SearchOutcome::Results { hits, .. } => {
                for hit in &hits {
                    output.highlight(&format!("{}  {}", hit.title, hit.url));
                    if !hit.excerpt.is_empty() {
                        output.detail(&format!("  {}", hit.excerpt));
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: SearchCommand,
    }

    #[test]
    fn test_parse_query_args() {
        let cli =
            TestCli::try_parse_from(["search", "query", "install guide", "--limit", "5"]).unwrap();

        let SearchCommand::Query(args) = cli.command else {
            panic!("expected query");
        };
        assert_eq!(args.query, "install guide");
        assert_eq!(args.limit, Some(5));
        assert_eq!(args.index, None);
    }

    #[test]
    fn test_parse_build_output() {
        let cli = TestCli::try_parse_from(["search", "build", "-o", "out/index.json"]).unwrap();

        let SearchCommand::Build(args) = cli.command else {
            panic!("expected build");
        };
        assert_eq!(args.output, Some(PathBuf::from("out/index.json")));
    }
}
