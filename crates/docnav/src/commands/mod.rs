//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod page;
pub(crate) mod tree;

use std::path::PathBuf;

use clap::Args;
use docnav_config::{CliSettings, Config};
use docnav_navigation::{BuildOptions, MarkdownFileFactory, Navigation, NavigationBuilder};
use docnav_storage::{FsStorage, Storage};
use docnav_toc::DiagnosticsCollector;

use crate::error::CliError;
use crate::output::Output;

pub(crate) use check::CheckArgs;
pub(crate) use page::PageArgs;
pub(crate) use tree::TreeArgs;

/// Documentation set selection shared by all commands.
#[derive(Args)]
pub(crate) struct SourceArgs {
    /// Documentation source directory containing `docset.yml` (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Repository name used in page identities (overrides config).
    #[arg(short, long)]
    repository: Option<String>,

    /// URL prefix of the documentation set (overrides config).
    #[arg(long)]
    path_prefix: Option<String>,

    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long, env = "DOCNAV_CONFIG")]
    config: Option<PathBuf>,
}

impl SourceArgs {
    /// Load configuration and build the navigation of the selected docset.
    pub(crate) fn build(
        &self,
        diagnostics: &mut DiagnosticsCollector,
    ) -> Result<Navigation, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            repository: self.repository.clone(),
            path_prefix: self.path_prefix.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::info!(
            source_dir = %config.docs_resolved.source_dir.display(),
            repository = %config.docs_resolved.repository,
            "Building navigation"
        );

        let storage = FsStorage::new(config.docs_resolved.source_dir.clone());
        let options = BuildOptions {
            repository: config.docs_resolved.repository.clone(),
            path_prefix: config.docs_resolved.path_prefix.clone(),
            mounts: config.navigation.mounts.clone(),
        };
        build_navigation(&storage, options, diagnostics)
    }
}

/// Build navigation from `storage` with markdown-derived titles.
pub(crate) fn build_navigation(
    storage: &dyn Storage,
    options: BuildOptions,
    diagnostics: &mut DiagnosticsCollector,
) -> Result<Navigation, CliError> {
    let factory = MarkdownFileFactory::new(storage, options.repository.clone());
    let navigation = NavigationBuilder::new(storage, &factory, options).build(diagnostics)?;
    tracing::info!(items = navigation.len(), "Navigation built");
    Ok(navigation)
}

/// Print every collected diagnostic.
///
/// Called before a build error is propagated so the causes are shown.
pub(crate) fn report(output: &Output, diagnostics: &DiagnosticsCollector) {
    for diagnostic in diagnostics.iter() {
        output.diagnostic(diagnostic);
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use docnav_storage::MockStorage;

    pub(crate) fn storage() -> MockStorage {
        MockStorage::new()
            .with_file(
                "docset.yml",
                "project: Handbook\ntoc:\n  - file: index.md\n  - hidden: drafts.md\n  - folder: setup\n    children:\n      - file: index.md\n      - file: install.md\n  - crosslink: kibana://index.md\n    title: Kibana\n",
            )
            .with_file("index.md", "# Home")
            .with_file("drafts.md", "# Drafts")
            .with_file("setup/index.md", "# Setup")
            .with_file("setup/install.md", "# Install")
    }
}
