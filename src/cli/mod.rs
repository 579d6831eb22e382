pub mod args;
pub mod output;

use std::io::Write;

use crate::config::types::BrowseConfig;
use crate::dao::{AccessorFactory, CallContext, Gvr};
use crate::error::BrowseError;
use crate::view::pause::{execute, BatchOutcome, PauseAction};
use crate::view::FeedbackSink;

use output::format_table;

/// Print the rows of `gvr` to `out`.
pub fn list<W: Write>(
    out: &mut W,
    gvr: &Gvr,
    config: &BrowseConfig,
    factory: &dyn AccessorFactory,
    namespace: Option<&str>,
) -> Result<(), BrowseError> {
    let ctx = CallContext::with_timeout(config.call_timeout());
    let table = factory.accessor_for(gvr)?.list(&ctx, namespace)?;
    if table.rows.is_empty() {
        writeln!(out, "No {} found", gvr.resource())?;
    } else {
        write!(out, "{}", format_table(&table))?;
    }
    Ok(())
}

/// Apply `action` to `paths` without a dialog.
///
/// Feedback goes to `sink`; a batch that stops early is an error so the
/// process exits non-zero.
pub fn run_batch(
    action: PauseAction,
    paths: &[String],
    gvr: &Gvr,
    config: &BrowseConfig,
    factory: &dyn AccessorFactory,
    sink: &mut dyn FeedbackSink,
) -> Result<(), BrowseError> {
    if config.is_read_only() {
        return Err(BrowseError::ReadOnly(action.label().to_lowercase()));
    }
    let ctx = CallContext::with_timeout(config.call_timeout());
    tracing::info!(action = %action, count = paths.len(), gvr = %gvr, "Running batch");
    match execute(&ctx, paths, action, gvr, factory, sink) {
        BatchOutcome::Completed(_) => Ok(()),
        BatchOutcome::Aborted { applied } => Err(BrowseError::Incomplete {
            applied,
            total: paths.len(),
        }),
    }
}
