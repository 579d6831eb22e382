//! Bottom status bar showing key binding hints.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::Component;
use crate::view::keys::KeyActions;

/// Status bar widget displayed at the bottom of the TUI.
///
/// Shows available key bindings as a horizontal bar. Dangerous bindings
/// are drawn in the warning colour.
pub struct StatusBar {
    /// Key binding hints as (key, description, dangerous).
    pub hints: Vec<(String, String, bool)>,
}

impl StatusBar {
    pub fn new() -> Self {
        Self { hints: Vec::new() }
    }

    pub fn from_actions(actions: &KeyActions) -> Self {
        Self {
            hints: actions.hints(),
        }
    }
}

impl Component for StatusBar {
    fn render(&self, frame: &mut Frame, area: Rect) {
        let key_style = Style::default()
            .fg(Color::Black)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD);
        let danger_key_style = Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        let desc_style = Style::default().fg(Color::Gray);
        let sep_style = Style::default().fg(Color::DarkGray);

        let mut spans = Vec::new();
        for (i, (key, desc, dangerous)) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", sep_style));
            }
            let style = if *dangerous { danger_key_style } else { key_style };
            spans.push(Span::styled(format!(" {} ", key), style));
            spans.push(Span::styled(format!(" {}", desc), desc_style));
        }

        let line = Line::from(spans);
        let paragraph = Paragraph::new(line);
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::action::Action;
    use crate::view::keys::KeyAction;
    use ratatui::crossterm::event::KeyCode;

    #[test]
    fn hints_follow_key_actions() {
        let mut aa = KeyActions::new();
        aa.add(KeyCode::Char('q'), KeyAction::new("Quit", Action::Quit));
        let bar = StatusBar::from_actions(&aa);
        assert_eq!(bar.hints, vec![("q".into(), "Quit".into(), false)]);
        assert!(StatusBar::new().hints.is_empty());
    }
}
