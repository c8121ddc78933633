//! `refdoc outdated` command.

use std::path::Path;

use refdoc_config::Config;
use refdoc_render::BuildPass;

use crate::error::CliError;
use crate::output::Output;

/// Print documents whose API entities changed, one per line.
pub(crate) fn execute(config_path: Option<&Path>) -> Result<(), CliError> {
    let output = Output::new();
    let config = Config::load(config_path, None)?;
    let report = BuildPass::new(super::build_settings(&config)).outdated()?;
    for docname in &report.outdated {
        output.data(docname)?;
    }
    Ok(())
}
