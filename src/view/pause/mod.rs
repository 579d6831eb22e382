//! Pause/resume extension for resource viewers.
//!
//! Bound to `z`, it turns the current selection into one pause or resume
//! action, asks for confirmation in a modal form and then applies the
//! action to every selected resource under a single call timeout.

pub mod action;
pub mod executor;

use ratatui::crossterm::event::KeyCode;

pub use action::{resolve_default_action, PauseAction, PAUSE, PAUSED_COLUMN, RESUME};
pub use executor::{execute, BatchOutcome};

use super::keys::{ActionOpts, KeyAction, KeyActions};
use super::ResourceViewer;
use crate::config::types::DialogStyle;
use crate::dao::{singularize, CallContext, Gvr};
use crate::error::BrowseError;
use crate::tui::action::Action;
use crate::tui::components::modal_form::ModalForm;

pub const PAUSE_RESUME: &str = "Pause/Resume";

/// Page key of the dialog. Only one pause dialog is open at a time.
pub const PAUSE_DIALOG_KEY: &str = "pause";

/// Key the extension binds.
pub const PAUSE_KEY: KeyCode = KeyCode::Char('z');

const OK_BUTTON: usize = 0;
const CANCEL_BUTTON: usize = 1;

/// State of one open dialog, read by the OK handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PauseSession {
    pub paths: Vec<String>,
    pub action: PauseAction,
}

#[derive(Debug, Default)]
pub struct PauseExtender {
    session: Option<PauseSession>,
}

impl PauseExtender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&PauseSession> {
        self.session.as_ref()
    }

    /// Register the pause key unless the viewer is read-only.
    pub fn bind_keys(&self, viewer: &dyn ResourceViewer, aa: &mut KeyActions) {
        if viewer.config().is_read_only() {
            return;
        }
        aa.add(
            PAUSE_KEY,
            KeyAction::with_opts(
                PAUSE_RESUME,
                Action::TogglePause,
                ActionOpts {
                    visible: true,
                    dangerous: true,
                },
            ),
        );
    }

    /// Open the confirmation dialog for the current selection.
    pub fn toggle_pause_cmd(&mut self, viewer: &mut dyn ResourceViewer) {
        let paths = viewer.selection().selected_items();
        if paths.is_empty() {
            return;
        }

        let _stopped = viewer.gate().stop();

        let action = match resolve_default_action(&paths, || value_of(&*viewer, PAUSED_COLUMN)) {
            Ok(action) => action,
            Err(err) => {
                tracing::error!(error = %err, "Reading 'PAUSED' state failed");
                viewer.flash().err(&err);
                return;
            }
        };

        let form = make_dialog(&paths, action, viewer.gvr(), &viewer.config().dialog);
        tracing::debug!(count = paths.len(), action = %action, "Opening pause dialog");
        self.session = Some(PauseSession { paths, action });

        let pages = viewer.pages();
        pages.add_page(PAUSE_DIALOG_KEY, form, false, false);
        pages.show_page(PAUSE_DIALOG_KEY);
    }

    /// Handle an action coming from the dialog.
    pub fn handle_dialog_action(&mut self, action: Action, viewer: &mut dyn ResourceViewer) {
        match action {
            Action::DialogOption { label, .. } => match label.parse::<PauseAction>() {
                Ok(chosen) => {
                    if let Some(session) = self.session.as_mut() {
                        session.action = chosen;
                    }
                }
                Err(err) => {
                    tracing::error!(error = %err, "Unexpected dialog option");
                    viewer.flash().err(&err);
                }
            },
            Action::DialogButton(OK_BUTTON) => {
                if let Some(session) = self.session.take() {
                    self.commit(&session, viewer);
                }
                self.dismiss_dialog(viewer);
            }
            Action::DialogButton(CANCEL_BUTTON) | Action::DialogDone => {
                self.dismiss_dialog(viewer);
            }
            _ => {}
        }
    }

    fn commit(&self, session: &PauseSession, viewer: &mut dyn ResourceViewer) -> BatchOutcome {
        let ctx = CallContext::with_timeout(viewer.config().call_timeout());
        let gvr = viewer.gvr().clone();
        let factory = viewer.factory();
        execute(
            &ctx,
            &session.paths,
            session.action,
            &gvr,
            factory.as_ref(),
            viewer.flash(),
        )
    }

    fn dismiss_dialog(&mut self, viewer: &mut dyn ResourceViewer) {
        self.session = None;
        viewer.pages().remove_page(PAUSE_DIALOG_KEY);
    }
}

/// Cell value of `column` for the row under the cursor.
fn value_of(viewer: &dyn ResourceViewer, column: &str) -> Result<String, BrowseError> {
    let selection = viewer.selection();
    let idx = selection
        .header_index(column)
        .ok_or_else(|| BrowseError::NoColumn {
            column: column.to_string(),
        })?;
    selection.selected_cell(idx).ok_or(BrowseError::NoSelection)
}

/// Build the confirmation form for `paths`.
///
/// One path gets a fixed action and a yes/no prompt; several paths get an
/// action drop-down starting on Pause.
pub fn make_dialog(paths: &[String], action: PauseAction, gvr: &Gvr, style: &DialogStyle) -> ModalForm {
    let mut form = ModalForm::new(PAUSE_RESUME, style.clone());

    if paths.len() > 1 {
        form.add_drop_down("Action:", &PauseAction::labels(), 0);
    }
    form.add_button("OK").add_button("Cancel");
    for i in [OK_BUTTON, CANCEL_BUTTON] {
        if let Some(b) = form.button_mut(i) {
            b.set_background_color_activated(&style.button_focus_bg)
                .set_label_color_activated(&style.button_focus_fg);
        }
    }

    let msg = if paths.len() > 1 {
        format!("{} [{}] {}?", PAUSE_RESUME, paths.len(), gvr.resource())
    } else {
        format!(
            "{} {} {}?",
            action,
            singularize(gvr.resource()),
            paths.first().map(String::as_str).unwrap_or_default()
        )
    };
    form.set_text(msg);
    form
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::view::keys::KeyActions;
    use crate::view::testing::{FakeViewer, RecordingAccessor};

    fn open(viewer: &mut FakeViewer) -> PauseExtender {
        let mut ext = PauseExtender::new();
        ext.toggle_pause_cmd(viewer);
        ext
    }

    fn dialog(viewer: &FakeViewer) -> &ModalForm {
        &viewer.pages.pages.get(PAUSE_DIALOG_KEY).expect("dialog open").0
    }

    #[test]
    fn binds_dangerous_visible_key() {
        let viewer = FakeViewer::new(&[]);
        let mut aa = KeyActions::new();
        PauseExtender::new().bind_keys(&viewer, &mut aa);

        let bound = aa.get(&PAUSE_KEY).expect("pause key bound");
        assert_eq!(bound.description, "Pause/Resume");
        assert_eq!(bound.action, Action::TogglePause);
        assert!(bound.opts.visible);
        assert!(bound.opts.dangerous);
    }

    #[test]
    fn read_only_skips_binding() {
        let mut viewer = FakeViewer::new(&[]);
        viewer.config.read_only = true;
        let mut aa = KeyActions::new();
        PauseExtender::new().bind_keys(&viewer, &mut aa);
        assert!(aa.get(&PAUSE_KEY).is_none());
        assert!(aa.is_empty());
    }

    #[test]
    fn empty_selection_is_a_no_op() {
        let mut viewer = FakeViewer::new(&[]);
        let ext = open(&mut viewer);

        assert!(ext.session().is_none());
        assert!(viewer.pages.pages.is_empty());
        assert!(viewer.pages.shown.is_empty());
        assert!(viewer.flash.messages.is_empty());
        assert!(!viewer.gate.is_stopped());
    }

    #[test]
    fn single_running_row_prompts_pause() {
        let mut viewer = FakeViewer::new(&["default/web"]).with_paused_cell("false");
        let ext = open(&mut viewer);

        let form = dialog(&viewer);
        assert_eq!(form.title(), "Pause/Resume");
        assert_eq!(form.text(), "Pause deployment default/web?");
        assert!(form.dropdown().is_none());
        let labels: Vec<&str> = form.buttons().iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["OK", "Cancel"]);
        assert_eq!(viewer.pages.shown, vec![PAUSE_DIALOG_KEY]);
        assert_eq!(ext.session().unwrap().action, PauseAction::Pause);
        assert!(!viewer.gate.is_stopped());
    }

    #[test]
    fn input_is_stopped_while_dialog_is_added() {
        let mut viewer = FakeViewer::new(&["default/web"]).with_paused_cell("false");
        assert!(!viewer.gate.is_stopped());
        open(&mut viewer);

        assert_eq!(viewer.pages.added_while_stopped, vec![true]);
        assert!(!viewer.gate.is_stopped());
    }

    #[test]
    fn single_paused_row_prompts_resume() {
        let mut viewer = FakeViewer::new(&["default/web"]).with_paused_cell("true");
        let ext = open(&mut viewer);

        assert_eq!(dialog(&viewer).text(), "Resume deployment default/web?");
        assert_eq!(ext.session().unwrap().action, PauseAction::Resume);
    }

    #[test]
    fn buttons_take_focus_colours_from_style() {
        let mut viewer = FakeViewer::new(&["default/web"]).with_paused_cell("false");
        viewer.config.dialog.button_focus_bg = "magenta".into();
        viewer.config.dialog.button_focus_fg = "white".into();
        open(&mut viewer);

        for b in dialog(&viewer).buttons() {
            assert_eq!(b.activated_bg.as_deref(), Some("magenta"));
            assert_eq!(b.activated_fg.as_deref(), Some("white"));
        }
    }

    #[test]
    fn missing_paused_column_aborts_before_dialog() {
        let mut viewer = FakeViewer::new(&["default/web"]).with_paused_cell("false");
        viewer.selection.header = vec!["NAMESPACE".into(), "NAME".into()];
        let ext = open(&mut viewer);

        assert!(ext.session().is_none());
        assert!(viewer.pages.pages.is_empty());
        assert_eq!(viewer.flash.errors(), vec!["no column index for PAUSED"]);
        assert!(!viewer.gate.is_stopped());
    }

    #[test]
    fn missing_row_aborts_before_dialog() {
        let mut viewer = FakeViewer::new(&["default/web"]);
        let ext = open(&mut viewer);

        assert!(ext.session().is_none());
        assert_eq!(viewer.flash.errors(), vec!["no resource selected"]);
    }

    #[test]
    fn multi_selection_offers_action_choice() {
        let mut viewer = FakeViewer::new(&["ns/a", "ns/b", "ns/c"]).with_paused_cell("true");
        let ext = open(&mut viewer);

        let form = dialog(&viewer);
        assert_eq!(form.text(), "Pause/Resume [3] deployments?");
        let dd = form.dropdown().expect("action drop-down");
        assert_eq!(dd.label, "Action:");
        assert_eq!(dd.options, vec!["Pause", "Resume"]);
        assert_eq!(dd.selected, 0);
        assert_eq!(ext.session().unwrap().action, PauseAction::Pause);
    }

    #[test]
    fn ok_applies_default_action_and_dismisses() {
        let mut viewer = FakeViewer::new(&["default/web"]).with_paused_cell("true");
        let mut ext = open(&mut viewer);

        ext.handle_dialog_action(Action::DialogButton(0), &mut viewer);

        assert_eq!(viewer.calls(), vec!["resume default/web"]);
        assert_eq!(viewer.flash.infos(), vec!["[1] deployment paused successfully"]);
        assert!(viewer.pages.pages.is_empty());
        assert_eq!(viewer.pages.removed, vec![PAUSE_DIALOG_KEY]);
        assert!(ext.session().is_none());
    }

    #[test]
    fn option_change_drives_commit() {
        let mut viewer = FakeViewer::new(&["ns/a", "ns/b"]);
        let mut ext = open(&mut viewer);

        ext.handle_dialog_action(
            Action::DialogOption {
                index: 1,
                label: "Resume".into(),
            },
            &mut viewer,
        );
        assert_eq!(ext.session().unwrap().action, PauseAction::Resume);

        ext.handle_dialog_action(Action::DialogButton(0), &mut viewer);
        assert_eq!(viewer.calls(), vec!["resume ns/a", "resume ns/b"]);
        assert_eq!(viewer.flash.infos(), vec!["deployments ns/a paused successfully"]);
    }

    #[test]
    fn unknown_option_keeps_previous_action() {
        let mut viewer = FakeViewer::new(&["ns/a", "ns/b"]);
        let mut ext = open(&mut viewer);

        ext.handle_dialog_action(
            Action::DialogOption {
                index: 2,
                label: "Restart".into(),
            },
            &mut viewer,
        );

        assert_eq!(ext.session().unwrap().action, PauseAction::Pause);
        assert_eq!(
            viewer.flash.errors(),
            vec!["failed to identify action; must be 'Pause' or 'Resume' but is: 'Restart'"]
        );
    }

    #[test]
    fn cancel_never_calls_accessor() {
        let mut viewer = FakeViewer::new(&["ns/a", "ns/b"]);
        let mut ext = open(&mut viewer);

        ext.handle_dialog_action(Action::DialogButton(1), &mut viewer);

        assert!(viewer.calls().is_empty());
        assert!(viewer.pages.pages.is_empty());
        assert!(ext.session().is_none());
        assert!(viewer.flash.messages.is_empty());
    }

    #[test]
    fn done_callback_dismisses_without_executing() {
        let mut viewer = FakeViewer::new(&["default/web"]).with_paused_cell("false");
        let mut ext = open(&mut viewer);

        ext.handle_dialog_action(Action::DialogDone, &mut viewer);

        assert!(viewer.calls().is_empty());
        assert_eq!(viewer.pages.removed, vec![PAUSE_DIALOG_KEY]);
        assert!(ext.session().is_none());
    }

    #[test]
    fn failing_item_is_reported_and_dialog_still_dismissed() {
        let mut viewer = FakeViewer::new(&["ns/a", "ns/b", "ns/c"]);
        viewer.accessor = Some(Arc::new(RecordingAccessor {
            fail_on: vec!["ns/b".into()],
            ..RecordingAccessor::pausable()
        }));
        let mut ext = open(&mut viewer);

        ext.handle_dialog_action(Action::DialogButton(0), &mut viewer);

        assert_eq!(viewer.calls(), vec!["pause ns/a", "pause ns/b"]);
        assert_eq!(
            viewer.flash.errors(),
            vec!["failed to Pause: Store error: boom on ns/b"]
        );
        assert!(viewer.pages.pages.is_empty());
    }

    #[test]
    fn non_pausable_kind_reports_on_commit() {
        let mut viewer = FakeViewer::new(&["ns/a", "ns/b"]);
        viewer.gvr = Gvr::daemonsets();
        viewer.accessor = Some(Arc::new(RecordingAccessor::default()));
        let mut ext = open(&mut viewer);

        assert_eq!(dialog(&viewer).text(), "Pause/Resume [2] daemonsets?");
        ext.handle_dialog_action(Action::DialogButton(0), &mut viewer);

        assert_eq!(
            viewer.flash.errors(),
            vec!["expecting a pausable resource for \"apps/v1/daemonsets\""]
        );
        assert!(viewer.pages.pages.is_empty());
    }

    #[test]
    fn make_dialog_single_has_no_dropdown() {
        let paths = vec!["kube-system/coredns".to_string()];
        let form = make_dialog(&paths, PauseAction::Resume, &Gvr::deployments(), &DialogStyle::default());
        assert_eq!(form.text(), "Resume deployment kube-system/coredns?");
        assert!(form.dropdown().is_none());
    }
}
