//! Applies a confirmed pause/resume to a batch of resources.

use super::action::PauseAction;
use crate::dao::{singularize, AccessorFactory, CallContext, Gvr};
use crate::error::BrowseError;
use crate::view::FeedbackSink;

/// How a batch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Every path was applied.
    Completed(usize),
    /// Stopped on an error after `applied` paths went through.
    Aborted { applied: usize },
}

impl BatchOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, BatchOutcome::Completed(_))
    }
}

/// Run `action` over `paths` in order, all under the one `ctx`.
///
/// The first failure is reported and ends the batch; paths already
/// applied stay applied. Capability problems are reported the same way
/// and nothing is attempted.
pub fn execute(
    ctx: &CallContext,
    paths: &[String],
    action: PauseAction,
    gvr: &Gvr,
    factory: &dyn AccessorFactory,
    flash: &mut dyn FeedbackSink,
) -> BatchOutcome {
    if paths.is_empty() {
        return BatchOutcome::Completed(0);
    }

    let accessor = match factory.accessor_for(gvr) {
        Ok(acc) => acc,
        Err(err) => {
            tracing::error!(gvr = %gvr, error = %err, "No accessor for resource");
            flash.err(&err);
            return BatchOutcome::Aborted { applied: 0 };
        }
    };
    let Some(pauser) = accessor.as_pausable() else {
        let err = BrowseError::NotPausable {
            gvr: gvr.to_string(),
        };
        tracing::error!(gvr = %gvr, "Resource is not pausable");
        flash.err(&err);
        return BatchOutcome::Aborted { applied: 0 };
    };

    for (applied, path) in paths.iter().enumerate() {
        let res = match action {
            PauseAction::Pause => pauser.pause(ctx, path),
            PauseAction::Resume => pauser.resume(ctx, path),
        };
        if let Err(err) = res {
            tracing::error!(path = %path, action = %action, error = %err, "{} pausing failed", path);
            flash.err(&BrowseError::action_failed(action.label(), err));
            return BatchOutcome::Aborted { applied };
        }
        tracing::debug!(path = %path, action = %action, "Applied");
    }

    flash.info(success_message(paths, gvr));
    BatchOutcome::Completed(paths.len())
}

/// Flash text for a fully applied batch.
///
/// Multi-path batches name only the first path.
pub fn success_message(paths: &[String], gvr: &Gvr) -> String {
    if paths.len() == 1 {
        format!(
            "[{}] {} paused successfully",
            paths.len(),
            singularize(gvr.resource())
        )
    } else {
        format!(
            "{} {} paused successfully",
            gvr.resource(),
            paths.first().map(String::as_str).unwrap_or_default()
        )
    }
}
