//! `docnav tree` command implementation.

use std::fmt::Write;

use clap::Args;
use docnav_navigation::{Navigation, NavigationItem};
use docnav_toc::DiagnosticsCollector;

use super::{SourceArgs, report};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the tree command.
#[derive(Args)]
pub(crate) struct TreeArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Print the rendered navigation as JSON.
    #[arg(long)]
    json: bool,
}

impl TreeArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let mut diagnostics = DiagnosticsCollector::new();
        let result = self.source.build(&mut diagnostics);
        report(&output, &diagnostics);
        let navigation = result?;

        if self.json {
            output.data(&serde_json::to_string_pretty(&navigation.nav_tree())?);
        } else {
            output.data(render_tree(&navigation).trim_end());
        }
        Ok(())
    }
}

/// Render the navigation as an indented outline.
///
/// Index pages are folded into the node they represent.
fn render_tree(navigation: &Navigation) -> String {
    let mut out = String::new();
    render_item(navigation, navigation.root(), 0, &mut out);
    out
}

fn render_item(navigation: &Navigation, item: &NavigationItem, level: usize, out: &mut String) {
    let _ = write!(
        out,
        "{}{} ({})",
        "  ".repeat(level),
        item.navigation_title(),
        item.url()
    );
    if item.hidden() {
        out.push_str(" [hidden]");
    }
    out.push('\n');

    let Some(node) = item.as_node() else {
        return;
    };
    for child in navigation.children(item.id()) {
        if child.id() == node.index() && child.as_leaf().is_some() {
            continue;
        }
        render_item(navigation, child, level + 1, out);
    }
}
