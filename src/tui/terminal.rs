use ratatui::DefaultTerminal;

/// Owns the terminal while the TUI runs.
///
/// `ratatui::init()` switches to the alternate screen, enables raw mode and
/// installs a panic hook. Dropping the session restores the terminal, so
/// every exit path out of the event loop leaves the shell usable.
pub struct TerminalSession {
    terminal: DefaultTerminal,
}

impl TerminalSession {
    pub fn start() -> Self {
        Self {
            terminal: ratatui::init(),
        }
    }

    pub fn terminal(&mut self) -> &mut DefaultTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        ratatui::restore();
    }
}
