//! `refdoc dump` command.

use std::path::Path;

use clap::Args;
use refdoc_config::Config;
use refdoc_model::{Index, PropertyPass};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the dump command.
#[derive(Args)]
pub(crate) struct DumpArgs {
    /// Omit empty fields.
    #[arg(long)]
    discard_empty: bool,
}

impl DumpArgs {
    /// Print the normalized declaration model as pretty JSON.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(config_path, None)?;
        let mut index = Index::open(
            &config.project_resolved.doxygen_dir,
            vec![Box::new(PropertyPass)],
        )?;
        let dump = index.dump(self.discard_empty)?;
        output.data(&serde_json::to_string_pretty(&dump)?)?;
        Ok(())
    }
}
