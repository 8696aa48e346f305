//! `shelf serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use shelf_config::{CliSettings, Config};
use shelf_server::{ServeOptions, run_server};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover shelf.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// CMS environment to use (overrides config).
    #[arg(short, long, env = "SHELF_ENV")]
    env: Option<String>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory with static assets and the search index (overrides config).
    #[arg(long)]
    public_dir: Option<PathBuf>,

    /// Enable verbose output (log render warnings and request traces).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            environment: self.env,
            public_dir: self.public_dir,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!("CMS environment: {}", config.cms.environment));
        output.info(&format!(
            "Public directory: {}",
            config.site_resolved.public_dir.display()
        ));
        if !config.search_resolved.index_path.exists() {
            output.warning(&format!(
                "Search index not found at {} (run `shelf search build`)",
                config.search_resolved.index_path.display()
            ));
        }

        let options = ServeOptions {
            version: version.to_owned(),
            verbose: self.verbose,
        };
        run_server(&config, &options)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
