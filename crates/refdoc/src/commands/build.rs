//! `refdoc build` command.

use std::path::{Path, PathBuf};

use clap::Args;
use refdoc_config::{CliSettings, Config};
use refdoc_render::BuildPass;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Rebuild every linked document regardless of timestamps.
    #[arg(long)]
    always_rebuild: bool,

    /// Source documents directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid, extraction fails
    /// or a directive cannot be expanded.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();
        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
            always_rebuild: self.always_rebuild.then_some(true),
            debug: None,
        };
        let config = Config::load(config_path, Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            output.info(&format!("Using {}", path.display()));
        }

        let settings = super::build_settings(&config);
        tracing::debug!(
            source_dir = %settings.source_dir.display(),
            output_dir = %settings.output_dir.display(),
            "Starting build"
        );
        let pass = BuildPass::new(settings);
        let report = pass.run()?;

        for docname in &report.removed {
            output.warning(&format!("Removed {docname}"));
        }
        output.success(&format!(
            "Expanded {} document(s): {} modified, {} outdated",
            report.written.len(),
            report.modified.len(),
            report.outdated.len()
        ));
        Ok(())
    }
}
