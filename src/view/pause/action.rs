use std::fmt;
use std::str::FromStr;

use crate::error::BrowseError;

/// Column holding the paused state of a row.
pub const PAUSED_COLUMN: &str = "PAUSED";

pub const PAUSE: &str = "Pause";
pub const RESUME: &str = "Resume";

/// What a confirmed dialog applies to every selected resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseAction {
    Pause,
    Resume,
}

impl PauseAction {
    /// Drop-down order; index 0 is the default.
    pub const ALL: [PauseAction; 2] = [PauseAction::Pause, PauseAction::Resume];

    pub fn label(self) -> &'static str {
        match self {
            PauseAction::Pause => PAUSE,
            PauseAction::Resume => RESUME,
        }
    }

    pub fn labels() -> [&'static str; 2] {
        [PauseAction::Pause.label(), PauseAction::Resume.label()]
    }
}

impl fmt::Display for PauseAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PauseAction {
    type Err = BrowseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            PAUSE => Ok(PauseAction::Pause),
            RESUME => Ok(PauseAction::Resume),
            other => Err(BrowseError::UnknownAction(other.to_string())),
        }
    }
}

/// Pick the action the dialog starts with.
///
/// Multi-row selections always start on Pause. A single row starts on
/// Resume when its paused cell reads exactly `"true"`. `read_paused` is
/// only called for single-row selections; its error aborts the workflow.
pub fn resolve_default_action<F>(selection: &[String], read_paused: F) -> Result<PauseAction, BrowseError>
where
    F: FnOnce() -> Result<String, BrowseError>,
{
    if selection.len() != 1 {
        return Ok(PauseAction::Pause);
    }
    let is_paused = read_paused()?;
    if is_paused == "true" {
        Ok(PauseAction::Resume)
    } else {
        Ok(PauseAction::Pause)
    }
}
