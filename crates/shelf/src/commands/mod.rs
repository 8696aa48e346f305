//! CLI command implementations.

pub(crate) mod reference;
pub(crate) mod search;
pub(crate) mod serve;
pub(crate) mod version;

use std::path::PathBuf;

use clap::Args;
use shelf_config::{CliSettings, Config};

use crate::error::CliError;

pub(crate) use reference::ReferenceCommand;
pub(crate) use search::SearchCommand;
pub(crate) use serve::ServeArgs;
pub(crate) use version::VersionCommand;

/// Configuration arguments shared by the offline commands.
#[derive(Args, Debug)]
pub(crate) struct ConfigArgs {
    /// Path to configuration file (default: auto-discover shelf.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// CMS environment to use (overrides config).
    #[arg(short, long, env = "SHELF_ENV")]
    env: Option<String>,
}

impl ConfigArgs {
    pub(crate) fn load(&self) -> Result<Config, CliError> {
        let settings = CliSettings {
            environment: self.env.clone(),
            ..CliSettings::default()
        };
        Ok(Config::load(self.config.as_deref(), Some(&settings))?)
    }
}
