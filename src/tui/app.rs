use std::sync::Arc;
use std::time::Duration;

use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::action::Action;
use super::browser::Browser;
use super::components::status_bar::StatusBar;
use super::components::Component;
use super::event::{Event, EventHandler};
use super::terminal::TerminalSession;
use super::theme;
use crate::config::types::BrowseConfig;
use crate::dao::{AccessorFactory, Gvr};
use crate::view::keys::{ActionOpts, KeyAction, KeyActions};
use crate::view::pause::{PauseExtender, PAUSE_DIALOG_KEY};
use crate::view::ResourceViewer;

/// Root application state for the TUI.
pub struct App {
    browser: Browser,
    /// Pause/resume extension attached to the browser.
    pause: PauseExtender,
    key_actions: KeyActions,
    should_quit: bool,
}

impl App {
    pub fn new(
        gvr: Gvr,
        config: BrowseConfig,
        factory: Arc<dyn AccessorFactory>,
        namespace: Option<String>,
    ) -> Self {
        let mut browser = Browser::new(gvr, config, factory, namespace);
        browser.reload();

        let hidden = ActionOpts {
            visible: false,
            dangerous: false,
        };
        let mut key_actions = KeyActions::new();
        key_actions.add(KeyCode::Char('q'), KeyAction::new("Quit", Action::Quit));
        key_actions.add(KeyCode::Char('r'), KeyAction::new("Reload", Action::Reload));
        key_actions.add(KeyCode::Char(' '), KeyAction::new("Mark", Action::ToggleMark));
        key_actions.add(
            KeyCode::Char('j'),
            KeyAction::with_opts("Down", Action::ScrollDown, hidden),
        );
        key_actions.add(
            KeyCode::Char('k'),
            KeyAction::with_opts("Up", Action::ScrollUp, hidden),
        );

        let pause = PauseExtender::new();
        pause.bind_keys(&browser, &mut key_actions);

        Self {
            browser,
            pause,
            key_actions,
            should_quit: false,
        }
    }

    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    pub fn key_actions(&self) -> &KeyActions {
        &self.key_actions
    }

    /// Handle a key event at the app level.
    ///
    /// An open dialog gets every key. Otherwise bound keys are looked up
    /// first and anything else goes to the table.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Action {
        if let Some((page, action)) = self.browser.overlay_mut().handle_key_event(key) {
            if page == PAUSE_DIALOG_KEY {
                let committed = action == Action::DialogButton(0);
                self.pause.handle_dialog_action(action, &mut self.browser);
                if committed {
                    self.browser.reload();
                }
            }
            return Action::Noop;
        }

        let action = match self.key_actions.get(&key.code) {
            Some(bound) => bound.action.clone(),
            None => return self.browser.handle_table_key(key),
        };
        match action {
            Action::Quit => {
                self.should_quit = true;
                Action::Quit
            }
            Action::Reload => {
                self.browser.reload();
                Action::Noop
            }
            Action::TogglePause => {
                self.pause.toggle_pause_cmd(&mut self.browser);
                Action::Noop
            }
            _ => self.browser.handle_table_key(key),
        }
    }

    /// Called on each tick event for periodic state updates.
    pub fn on_tick(&mut self) {
        self.browser.on_tick();
    }

    /// Render the entire application UI.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Layout: context line, table (fills), flash line, status bar
        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

        let mut context = vec![
            Span::styled(" kbrowse ", theme::HEADER),
            Span::raw(format!(" {} ", self.browser.gvr())),
            Span::styled(
                format!(" ns: {} ", self.browser.namespace().unwrap_or("all")),
                Style::default().fg(Color::Gray),
            ),
        ];
        if self.browser.config().is_read_only() {
            context.push(Span::styled(" [read-only] ", theme::WARNING));
        }
        frame.render_widget(Paragraph::new(Line::from(context)), chunks[0]);

        self.browser.table().render(frame, chunks[1]);
        self.browser.flash_line().render(frame, chunks[2]);
        StatusBar::from_actions(&self.key_actions).render(frame, chunks[3]);

        self.browser.overlay().render(frame, area);
    }
}

/// Run the main TUI event loop.
///
/// Loops receiving events, updating state and rendering until the user
/// quits. The terminal is restored when the session drops.
pub async fn run_app(mut app: App) -> Result<(), std::io::Error> {
    let mut session = TerminalSession::start();

    let mut events = EventHandler::new(
        Duration::from_millis(250), // tick rate: 4Hz
        Duration::from_millis(50),  // render rate: 20fps
    );

    loop {
        match events.next().await {
            Event::Render => {
                session.terminal().draw(|frame| app.render(frame))?;
            }
            Event::Tick => app.on_tick(),
            Event::Key(key) => {
                app.handle_key_event(key);
                if app.should_quit {
                    break;
                }
            }
            Event::Resize(_, _) => {
                // ratatui handles resize automatically on next draw
            }
            Event::Quit => break,
        }
    }

    tracing::info!("TUI closed");
    Ok(())
}
