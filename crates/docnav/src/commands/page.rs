//! `docnav page` command implementation.

use clap::Args;
use docnav_navigation::{Navigation, NavigationItem};
use docnav_toc::DiagnosticsCollector;

use super::{SourceArgs, report};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the page command.
#[derive(Args)]
pub(crate) struct PageArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Page identity (`repo://path/to/page.md`) or docset-relative path.
    identity: String,
}

impl PageArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let mut diagnostics = DiagnosticsCollector::new();
        let result = self.source.build(&mut diagnostics);
        report(&output, &diagnostics);
        let navigation = result?;

        let identity = qualify(&navigation, &self.identity);
        let Some(summary) = describe(&navigation, &identity) else {
            return Err(CliError::Validation(format!(
                "Page '{identity}' is not part of the navigation"
            )));
        };

        output.data(&summary);
        Ok(())
    }
}

/// Prefix a bare path with the identity scheme of the documentation set.
fn qualify(navigation: &Navigation, identity: &str) -> String {
    if identity.contains("://") {
        return identity.to_owned();
    }
    let scheme = navigation
        .root()
        .identity()
        .and_then(|root| root.split_once("://"))
        .map_or("docs", |(scheme, _)| scheme);
    format!("{scheme}://{}", identity.trim_start_matches('/'))
}

/// Position of a page in the navigation, one field per line.
fn describe(navigation: &Navigation, identity: &str) -> Option<String> {
    let page = navigation.lookup(identity)?;
    let link = |item: Option<&NavigationItem>| {
        item.map_or_else(
            || "-".to_owned(),
            |item| format!("{} ({})", item.navigation_title(), item.url()),
        )
    };
    let breadcrumbs = navigation
        .breadcrumbs(identity)
        .into_iter()
        .map(|crumb| crumb.title)
        .collect::<Vec<_>>()
        .join(" > ");

    Some(format!(
        "title:       {}\nurl:         {}\nposition:    {} of {}\nprevious:    {}\nnext:        {}\nbreadcrumbs: {}",
        page.navigation_title(),
        page.url(),
        page.navigation_index(),
        navigation.len(),
        link(navigation.previous(identity)),
        link(navigation.next(identity)),
        if breadcrumbs.is_empty() { "-" } else { breadcrumbs.as_str() },
    ))
}
