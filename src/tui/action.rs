/// Actions that can be dispatched between TUI components.
///
/// Each component's `handle_key_event` returns an Action,
/// and the App's main loop processes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No operation -- event was handled but no further action needed.
    Noop,
    /// Quit the TUI application.
    Quit,
    /// Move the table cursor up.
    ScrollUp,
    /// Move the table cursor down.
    ScrollDown,
    /// Mark or unmark the row under the cursor.
    ToggleMark,
    /// Reload the resource table.
    Reload,
    /// Open the pause/resume dialog for the selection.
    TogglePause,
    /// A dialog drop-down changed its option.
    DialogOption { index: usize, label: String },
    /// A dialog button was pressed.
    DialogButton(usize),
    /// The dialog was dismissed from outside its buttons (Esc).
    DialogDone,
}
