//! `confvault restore` command implementation.

use std::path::PathBuf;

use clap::Args;
use confvault_config::{Config, Credentials};
use confvault_confluence::{ConfluenceClient, artifact_paths, restore_page};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the restore command.
#[derive(Args)]
pub(crate) struct RestoreArgs {
    /// Directory holding the saved artifacts.
    directory: PathBuf,

    /// Artifact base name (the sanitized page title, without extension).
    name: String,

    /// Path to configuration file (default: auto-discover confvault.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl RestoreArgs {
    /// Execute the restore command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or credentials cannot be loaded,
    /// if the content artifact is missing or malformed, or if the
    /// create-page call fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref())?;
        let credentials = Credentials::load(&config.confluence, &config.base_dir())?;

        let client = ConfluenceClient::new(
            &config.confluence.base_url,
            &credentials.email,
            &credentials.api_token,
        );

        let (content_path, restrictions_path) = artifact_paths(&self.directory, &self.name);
        output.info(&format!("Restoring from {}...", content_path.display()));

        let report = restore_page(&client, &content_path, &restrictions_path)?;

        output.success(&format!(
            "Restored page \"{}\" (id {})",
            report.title, report.page_id
        ));
        if !report.restrictions_restored {
            output.warning(
                "Restrictions were not restored; the new page has default permissions.",
            );
        }

        Ok(())
    }
}
