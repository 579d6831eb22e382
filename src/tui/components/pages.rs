//! Overlay pages drawn above the resource table.

use ratatui::Frame;
use ratatui::crossterm::event::KeyEvent;
use ratatui::layout::Rect;

use super::modal_form::ModalForm;
use super::Component;
use crate::tui::action::Action;
use crate::view::PageRegistry;

struct Page {
    key: String,
    form: ModalForm,
    resize: bool,
    visible: bool,
}

/// Stack of keyed pages; the last visible page is in front and gets keys.
#[derive(Default)]
pub struct Pages {
    pages: Vec<Page>,
}

impl Pages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key of the page in front, if any page is visible.
    pub fn front(&self) -> Option<&str> {
        self.pages
            .iter()
            .rev()
            .find(|p| p.visible)
            .map(|p| p.key.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&ModalForm> {
        self.pages.iter().find(|p| p.key == key).map(|p| &p.form)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Whether the page under `key` follows the screen size.
    pub fn resizes(&self, key: &str) -> Option<bool> {
        self.pages.iter().find(|p| p.key == key).map(|p| p.resize)
    }

    /// Send a key to the front page. `None` when no page is visible.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<(String, Action)> {
        let page = self.pages.iter_mut().rev().find(|p| p.visible)?;
        let action = page.form.handle_key_event(key);
        Some((page.key.clone(), action))
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        for page in self.pages.iter().filter(|p| p.visible) {
            page.form.render(frame, area);
        }
    }
}

impl PageRegistry for Pages {
    fn add_page(&mut self, key: &str, form: ModalForm, resize: bool, visible: bool) {
        self.remove_page(key);
        self.pages.push(Page {
            key: key.to_string(),
            form,
            resize,
            visible,
        });
    }

    fn show_page(&mut self, key: &str) {
        if let Some(pos) = self.pages.iter().position(|p| p.key == key) {
            let mut page = self.pages.remove(pos);
            page.visible = true;
            self.pages.push(page);
        }
    }

    fn remove_page(&mut self, key: &str) {
        self.pages.retain(|p| p.key != key);
    }

    fn has_page(&self, key: &str) -> bool {
        self.pages.iter().any(|p| p.key == key)
    }
}
