//! CLI command implementations.

mod build;
mod dump;
pub(crate) mod extract;
pub(crate) mod outdated;

pub(crate) use build::BuildArgs;
pub(crate) use dump::DumpArgs;

use refdoc_config::Config;
use refdoc_render::BuildSettings;
use refdoc_watch::WatchSettings;

/// Map a loaded configuration onto build pass settings.
pub(crate) fn build_settings(config: &Config) -> BuildSettings {
    let project = &config.project_resolved;
    let docs = &config.docs_resolved;
    BuildSettings {
        source_dir: docs.source_dir.clone(),
        output_dir: docs.output_dir.clone(),
        state_file: docs.state_file.clone(),
        project_dir: project.project_dir.clone(),
        xml_dir: project.doxygen_dir.clone(),
        include_dir: project.include_dir.clone(),
        header_pattern: project.header_pattern.clone(),
        extractor: project.extractor.clone(),
        comment_marker: config.listing.comment_marker.clone(),
        watch: WatchSettings {
            always_rebuild: config.flags.always_rebuild,
            debug: config.flags.debug,
        },
    }
}
