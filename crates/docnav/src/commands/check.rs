//! `docnav check` command implementation.

use clap::Args;
use docnav_navigation::Navigation;
use docnav_toc::DiagnosticsCollector;

use super::{SourceArgs, report};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Treat warnings as errors.
    #[arg(long)]
    strict: bool,
}

impl CheckArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let mut diagnostics = DiagnosticsCollector::new();
        let result = self.source.build(&mut diagnostics);
        report(&output, &diagnostics);

        output.success(&verdict(result, &diagnostics, self.strict)?);
        Ok(())
    }
}

/// Success line of a check, or the error failing it.
fn verdict(
    result: Result<Navigation, CliError>,
    diagnostics: &DiagnosticsCollector,
    strict: bool,
) -> Result<String, CliError> {
    let navigation = result?;
    let summary = summarize(diagnostics);
    if failed(diagnostics, strict) {
        return Err(CliError::Validation(summary));
    }
    Ok(format!("{} navigation items, {summary}", navigation.len()))
}

fn summarize(diagnostics: &DiagnosticsCollector) -> String {
    format!(
        "{} error(s), {} warning(s)",
        diagnostics.errors(),
        diagnostics.warnings()
    )
}

fn failed(diagnostics: &DiagnosticsCollector, strict: bool) -> bool {
    diagnostics.has_errors() || (strict && diagnostics.warnings() > 0)
}
