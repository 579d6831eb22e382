//! Modal form: a titled prompt with an optional drop-down and a row of
//! buttons, drawn centred over the rest of the UI.
//!
//! Focus moves over the drop-down (when present) and then the buttons.
//! Left/Right change the drop-down option or move between buttons, Enter
//! presses the focused button and Esc reports the form as done.

use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::Component;
use crate::config::types::DialogStyle;
use crate::tui::action::Action;
use crate::tui::theme;

/// Drop-down choice control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropDown {
    pub label: String,
    pub options: Vec<String>,
    pub selected: usize,
}

impl DropDown {
    pub fn selected_option(&self) -> Option<&str> {
        self.options.get(self.selected).map(String::as_str)
    }
}

/// A form button with its colours when focused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormButton {
    pub label: String,
    pub activated_bg: Option<String>,
    pub activated_fg: Option<String>,
}

impl FormButton {
    pub fn set_background_color_activated(&mut self, color: &str) -> &mut Self {
        self.activated_bg = Some(color.to_string());
        self
    }

    pub fn set_label_color_activated(&mut self, color: &str) -> &mut Self {
        self.activated_fg = Some(color.to_string());
        self
    }
}

#[derive(Debug, Clone)]
pub struct ModalForm {
    title: String,
    text: String,
    style: DialogStyle,
    dropdown: Option<DropDown>,
    buttons: Vec<FormButton>,
    focus: usize,
}

impl ModalForm {
    pub fn new(title: impl Into<String>, style: DialogStyle) -> Self {
        Self {
            title: title.into(),
            text: String::new(),
            style,
            dropdown: None,
            buttons: Vec::new(),
            focus: 0,
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = text.into();
        self
    }

    pub fn add_drop_down(&mut self, label: &str, options: &[&str], initial: usize) -> &mut Self {
        self.dropdown = Some(DropDown {
            label: label.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            selected: initial.min(options.len().saturating_sub(1)),
        });
        self
    }

    pub fn add_button(&mut self, label: &str) -> &mut Self {
        self.buttons.push(FormButton {
            label: label.to_string(),
            activated_bg: None,
            activated_fg: None,
        });
        self
    }

    pub fn button_mut(&mut self, index: usize) -> Option<&mut FormButton> {
        self.buttons.get_mut(index)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn dropdown(&self) -> Option<&DropDown> {
        self.dropdown.as_ref()
    }

    pub fn buttons(&self) -> &[FormButton] {
        &self.buttons
    }

    fn item_count(&self) -> usize {
        self.buttons.len() + usize::from(self.dropdown.is_some())
    }

    /// Index of the focused button, `None` when the drop-down has focus.
    pub fn focused_button(&self) -> Option<usize> {
        match self.dropdown {
            Some(_) if self.focus == 0 => None,
            Some(_) => Some(self.focus - 1),
            None => Some(self.focus),
        }
    }

    fn focus_next(&mut self) {
        let n = self.item_count();
        if n > 0 {
            self.focus = (self.focus + 1) % n;
        }
    }

    fn focus_prev(&mut self) {
        let n = self.item_count();
        if n > 0 {
            self.focus = (self.focus + n - 1) % n;
        }
    }

    /// Step the drop-down selection and report the new option.
    fn cycle_option(&mut self, forward: bool) -> Action {
        let Some(dd) = self.dropdown.as_mut() else {
            return Action::Noop;
        };
        let n = dd.options.len();
        if n == 0 {
            return Action::Noop;
        }
        dd.selected = if forward {
            (dd.selected + 1) % n
        } else {
            (dd.selected + n - 1) % n
        };
        Action::DialogOption {
            index: dd.selected,
            label: dd.options[dd.selected].clone(),
        }
    }

    fn form_area(&self, area: Rect) -> Rect {
        let width = (self.text.chars().count() as u16 + 8).clamp(36, area.width.max(1));
        let height = 8 + u16::from(self.dropdown.is_some());
        let [row] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);
        let [cell] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(row);
        cell
    }
}

impl Component for ModalForm {
    fn handle_key_event(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc => Action::DialogDone,
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                Action::Noop
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_prev();
                Action::Noop
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l') => {
                let forward = matches!(key.code, KeyCode::Right | KeyCode::Char('l'));
                match self.focused_button() {
                    None => self.cycle_option(forward),
                    Some(_) => {
                        if forward {
                            self.focus_next();
                        } else {
                            self.focus_prev();
                        }
                        Action::Noop
                    }
                }
            }
            KeyCode::Enter => match self.focused_button() {
                Some(i) if i < self.buttons.len() => Action::DialogButton(i),
                _ => {
                    self.focus_next();
                    Action::Noop
                }
            },
            _ => Action::Noop,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let area = self.form_area(area);
        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::BORDER)
            .title(format!(" {} ", self.title))
            .title_style(theme::HEADER);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut constraints = vec![Constraint::Min(2)];
        if self.dropdown.is_some() {
            constraints.push(Constraint::Length(1));
        }
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Length(1));
        let chunks = Layout::vertical(constraints).split(inner);

        let text = Paragraph::new(self.text.as_str())
            .wrap(Wrap { trim: true })
            .centered()
            .style(Style::default().fg(theme::color(&self.style.field_fg)));
        frame.render_widget(text, chunks[0]);

        let mut next = 1;
        if let Some(dd) = &self.dropdown {
            let focused = self.focus == 0;
            let value_style = if focused {
                Style::default()
                    .fg(theme::color(&self.style.button_focus_fg))
                    .bg(theme::color(&self.style.button_focus_bg))
            } else {
                Style::default().fg(theme::color(&self.style.field_fg))
            };
            let line = Line::from(vec![
                Span::styled(
                    format!("{} ", dd.label),
                    Style::default().fg(theme::color(&self.style.label_fg)),
                ),
                Span::styled(
                    format!("< {} >", dd.selected_option().unwrap_or_default()),
                    value_style,
                ),
            ])
            .centered();
            frame.render_widget(Paragraph::new(line), chunks[next]);
            next += 1;
        }

        let focused_button = self.focused_button();
        let mut spans = Vec::new();
        for (i, b) in self.buttons.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            let style = if focused_button == Some(i) {
                let bg = b.activated_bg.as_deref().unwrap_or(&self.style.button_focus_bg);
                let fg = b.activated_fg.as_deref().unwrap_or(&self.style.button_focus_fg);
                Style::default()
                    .bg(theme::color(bg))
                    .fg(theme::color(fg))
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
                    .bg(theme::color(&self.style.button_bg))
                    .fg(theme::color(&self.style.button_fg))
            };
            spans.push(Span::styled(format!(" {} ", b.label), style));
        }
        frame.render_widget(Paragraph::new(Line::from(spans).centered()), chunks[next + 1]);
    }
}
