//! `refdoc extract` command.

use std::path::Path;

use refdoc_config::Config;
use refdoc_watch::{Extractor, ProcessHandle};

use crate::error::CliError;
use crate::output::Output;

/// Run the configured extraction tool in the project directory.
pub(crate) fn execute(config_path: Option<&Path>) -> Result<(), CliError> {
    let output = Output::new();
    let config = Config::load(config_path, None)?;
    let project = &config.project_resolved;
    let handle = ProcessHandle::new(&project.extractor, &project.project_dir);
    output.info(&format!("Running {}", handle.command()));
    handle.run()?;
    output.success("Extraction finished");
    Ok(())
}
