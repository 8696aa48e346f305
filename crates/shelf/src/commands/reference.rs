//! `shelf reference` subcommands.

use clap::{Args, Subcommand};
use shelf_openapi::SpecLibrary;

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// API reference commands.
#[derive(Subcommand)]
pub(crate) enum ReferenceCommand {
    /// List available reference documents.
    List(ListArgs),
    /// Show the endpoints of a reference document, grouped by tag.
    Show(ShowArgs),
}

impl ReferenceCommand {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        match self {
            Self::List(args) => args.execute(),
            Self::Show(args) => args.execute(),
        }
    }
}

/// Arguments for `reference list`.
#[derive(Args)]
pub(crate) struct ListArgs {
    #[command(flatten)]
    config: ConfigArgs,
}

impl ListArgs {
    fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.config.load()?;
        let library = SpecLibrary::new(config.reference_resolved.specs_dir.clone());

        let names = library.names()?;
        if names.is_empty() {
            output.info(&format!(
                "No reference documents in {}",
                library.dir().display()
            ));
        }
        for name in &names {
            output.info(name);
        }
        Ok(())
    }
}

/// Arguments for `reference show`.
#[derive(Args)]
pub(crate) struct ShowArgs {
    /// Reference document name (file stem).
    name: String,

    #[command(flatten)]
    config: ConfigArgs,
}

impl ShowArgs {
    fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.config.load()?;
        let library = SpecLibrary::new(config.reference_resolved.specs_dir.clone());

        let spec = library.load(&self.name)?;
        output.highlight(&format!("{} {}", spec.title, spec.version));

        for group in spec.group_by_tag() {
            output.info("");
            output.success(&group.tag);
            for endpoint in &group.endpoints {
                let line = format!("  {:<7} {}", endpoint.method, endpoint.path);
                if endpoint.deprecated {
                    output.warning(&format!("{line} (deprecated)"));
                } else {
                    output.info(&line);
                }
                if let Some(summary) = &endpoint.summary {
                    output.detail(&format!("          {summary}"));
                }
            }
        }
        Ok(())
    }
}
