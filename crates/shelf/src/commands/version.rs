//! `shelf version` subcommands.

use clap::{Args, Subcommand};
use shelf_cms::{CmsClient, VersionConfig, VersionCreator, VersionRecord};

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Content versioning commands.
#[derive(Subcommand)]
pub(crate) enum VersionCommand {
    /// Snapshot the current docs into a new version.
    Create(CreateArgs),
    /// List existing versions.
    List(ListArgs),
}

impl VersionCommand {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        match self {
            Self::Create(args) => args.execute(),
            Self::List(args) => args.execute(),
        }
    }
}

/// Arguments for `version create`.
#[derive(Args)]
pub(crate) struct CreateArgs {
    /// Version number (e.g. 1.0).
    number: String,

    /// Human-readable label (default: the version number).
    #[arg(short, long)]
    label: Option<String>,

    /// Show what would be copied without writing to the CMS.
    #[arg(long)]
    dry_run: bool,

    #[command(flatten)]
    config: ConfigArgs,
}

impl CreateArgs {
    fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.config.load()?;
        let client = CmsClient::from_endpoint(&config.require_cms()?);
        let creator = VersionCreator::new(&client, VersionConfig::from_config(&config));

        let label = self.label.unwrap_or_else(|| self.number.clone());
        let record = VersionRecord::new(self.number, label);

        if self.dry_run {
            let preview = creator.dry_run(&record)?;
            output.highlight(&format!(
                "Dry run: version {} would copy {} documents",
                preview.version.version_number,
                preview.documents.len()
            ));
            for doc in &preview.documents {
                output.detail(&format!(
                    "  {}: {} -> {}",
                    doc.collection, doc.source_path, doc.target_path
                ));
            }
            return Ok(());
        }

        output.info(&format!(
            "Creating version {} ({}) in environment '{}'",
            record.version_number, record.version_label, config.cms.environment
        ));
        let result = creator.create(&record)?;

        if result.is_complete() {
            output.success(&format!(
                "Created version {} ({} documents copied)",
                result.version.version_number,
                result.copied.len()
            ));
        } else {
            output.warning(&format!(
                "Created version {} with {} of {} documents copied",
                result.version.version_number,
                result.copied.len(),
                result.copied.len() + result.failed.len()
            ));
            for failed in &result.failed {
                output.error(&format!(
                    "  {}: {} -> {}: {}",
                    failed.collection, failed.source_path, failed.target_path, failed.error
                ));
            }
        }
        Ok(())
    }
}

/// Arguments for `version list`.
#[derive(Args)]
pub(crate) struct ListArgs {
    #[command(flatten)]
    config: ConfigArgs,
}

impl ListArgs {
    fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.config.load()?;
        let client = CmsClient::from_endpoint(&config.require_cms()?);
        let creator = VersionCreator::new(&client, VersionConfig::from_config(&config));

        let versions = creator.list_versions()?;
        if versions.is_empty() {
            output.info("No versions");
            return Ok(());
        }
        for version in &versions {
            if version.version_label.is_empty() || version.version_label == version.version_number {
                output.info(&version.version_number);
            } else {
                output.info(&format!(
                    "{}  ({})",
                    version.version_number, version.version_label
                ));
            }
        }
        Ok(())
    }
}
