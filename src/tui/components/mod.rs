//! Widgets of the browser screen.
//!
//! The table, flash line, status bar and modal form implement
//! `Component`. `Pages` stacks modal forms above the table.

pub mod flash;
pub mod modal_form;
pub mod pages;
pub mod resource_table;
pub mod status_bar;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::crossterm::event::KeyEvent;

use super::action::Action;

/// A widget that reacts to keys and ticks and draws itself into an area.
pub trait Component {
    /// Keys a widget does not use map to `Action::Noop`.
    fn handle_key_event(&mut self, _key: KeyEvent) -> Action {
        Action::Noop
    }

    /// Called once per tick.
    fn update(&mut self) {}

    fn render(&self, frame: &mut Frame, area: Rect);
}
