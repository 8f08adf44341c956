//! `confvault backup` command implementation.

use std::path::PathBuf;

use clap::Args;
use confvault_config::{Config, Credentials};
use confvault_confluence::{BackupStats, ConfluenceClient, TreeWalker, safe_filename};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the backup command.
#[derive(Args)]
pub(crate) struct BackupArgs {
    /// Path to configuration file (default: auto-discover confvault.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Destination directory for the mirror (overrides config).
    #[arg(long)]
    root_dir: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl BackupArgs {
    /// Execute the backup command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or credentials cannot be loaded,
    /// or if a destination directory cannot be created. Per-folder and
    /// per-page fetch failures are logged and counted, not fatal.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref())?;
        let roots = config.require_backup_roots()?.to_vec();
        let credentials = Credentials::load(&config.confluence, &config.base_dir())?;

        let client = ConfluenceClient::new(
            &config.confluence.base_url,
            &credentials.email,
            &credentials.api_token,
        );

        let backup_root = self.root_dir.unwrap_or_else(|| config.backup_root_dir());
        let mut totals = BackupStats::default();

        for root in roots {
            let dest = backup_root.join(safe_filename(&root.name));
            std::fs::create_dir_all(&dest)?;

            output.info(&format!("Backing up {} (folder {})...", root.name, root.id));

            let mut walker = TreeWalker::new(&client);
            walker.walk(&root.id, &dest);
            let stats = walker.into_stats();

            output.info(&format!(
                "  {} pages, {} folders{}",
                stats.pages_written(),
                stats.folders_created,
                summarize_problems(&stats)
            ));
            totals.merge(&stats);
        }

        output.success(&format!(
            "\nBackup finished: {} pages and {} folders written to {}",
            totals.pages_written(),
            totals.folders_created,
            backup_root.display()
        ));

        if totals.folders_failed > 0 || totals.pages_skipped > 0 || totals.pages_partial > 0 {
            output.warning(&format!(
                "Incomplete: {} folder(s) aborted, {} page(s) partial, {} page(s) skipped. \
                 Re-run with --verbose for details.",
                totals.folders_failed, totals.pages_partial, totals.pages_skipped
            ));
        }
        if totals.name_collisions > 0 {
            output.warning(&format!(
                "{} sibling title(s) collided after sanitization; later pages overwrote earlier ones.",
                totals.name_collisions
            ));
        }

        Ok(())
    }
}

/// Short problem suffix for a per-root summary line.
fn summarize_problems(stats: &BackupStats) -> String {
    let mut problems = Vec::new();
    if stats.folders_failed > 0 {
        problems.push(format!("{} folder(s) failed", stats.folders_failed));
    }
    if stats.pages_partial > 0 {
        problems.push(format!("{} partial", stats.pages_partial));
    }
    if stats.pages_skipped > 0 {
        problems.push(format!("{} skipped", stats.pages_skipped));
    }
    if problems.is_empty() {
        String::new()
    } else {
        format!(" ({})", problems.join(", "))
    }
}
