//! Key bindings a viewer exposes, with the hints shown for them.

use ratatui::crossterm::event::KeyCode;

use crate::tui::action::Action;

/// Options attached to a key action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionOpts {
    /// Shown in the hint bar.
    pub visible: bool,
    /// Mutates cluster state; hinted as such.
    pub dangerous: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAction {
    pub description: String,
    pub action: Action,
    pub opts: ActionOpts,
}

impl KeyAction {
    pub fn new(description: &str, action: Action) -> Self {
        Self::with_opts(
            description,
            action,
            ActionOpts {
                visible: true,
                dangerous: false,
            },
        )
    }

    pub fn with_opts(description: &str, action: Action, opts: ActionOpts) -> Self {
        Self {
            description: description.to_string(),
            action,
            opts,
        }
    }
}

/// Ordered key -> action map. Adding an existing key replaces its action.
#[derive(Debug, Clone, Default)]
pub struct KeyActions {
    actions: Vec<(KeyCode, KeyAction)>,
}

impl KeyActions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: KeyCode, action: KeyAction) {
        match self.actions.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = action,
            None => self.actions.push((key, action)),
        }
    }

    pub fn get(&self, key: &KeyCode) -> Option<&KeyAction> {
        self.actions.iter().find(|(k, _)| k == key).map(|(_, a)| a)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Visible bindings as (key label, description, dangerous).
    pub fn hints(&self) -> Vec<(String, String, bool)> {
        self.actions
            .iter()
            .filter(|(_, a)| a.opts.visible)
            .map(|(k, a)| (key_label(k), a.description.clone(), a.opts.dangerous))
            .collect()
    }
}

/// Short label for a key code, as shown in hints.
pub fn key_label(key: &KeyCode) -> String {
    match key {
        KeyCode::Char(' ') => "Space".into(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Esc => "Esc".into(),
        KeyCode::Tab => "Tab".into(),
        other => format!("{:?}", other),
    }
}
