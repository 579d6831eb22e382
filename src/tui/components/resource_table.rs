//! Resource table component: rows of one resource kind with marks.
//!
//! `space` marks rows; the selection is every marked row in table order,
//! or the row under the cursor when nothing is marked.

use std::collections::BTreeSet;

use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};

use super::Component;
use crate::dao::{self, Gvr};
use crate::tui::action::Action;
use crate::tui::theme;
use crate::view::pause::PAUSED_COLUMN;
use crate::view::SelectionSource;

pub struct ResourceTable {
    gvr: Gvr,
    data: dao::Table,
    table_state: TableState,
    marked: BTreeSet<String>,
}

impl ResourceTable {
    pub fn new(gvr: Gvr) -> Self {
        Self {
            gvr,
            data: dao::Table::default(),
            table_state: TableState::default(),
            marked: BTreeSet::new(),
        }
    }

    /// Replace the rows, keeping the cursor in range and dropping marks
    /// for rows that went away.
    pub fn set_data(&mut self, data: dao::Table) {
        self.data = data;
        let paths: BTreeSet<&str> = self.data.rows.iter().map(|r| r.path.as_str()).collect();
        self.marked.retain(|p| paths.contains(p.as_str()));

        if self.data.rows.is_empty() {
            self.table_state.select(None);
        } else {
            match self.table_state.selected() {
                None => self.table_state.select(Some(0)),
                Some(sel) if sel >= self.data.rows.len() => {
                    self.table_state.select(Some(self.data.rows.len() - 1))
                }
                Some(_) => {}
            }
        }
    }

    pub fn gvr(&self) -> &Gvr {
        &self.gvr
    }

    pub fn row_count(&self) -> usize {
        self.data.rows.len()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.table_state.selected()
    }

    pub fn is_marked(&self, path: &str) -> bool {
        self.marked.contains(path)
    }

    fn toggle_mark(&mut self) {
        let Some(path) = self.cursor_row().map(|r| r.path.clone()) else {
            return;
        };
        if !self.marked.remove(&path) {
            self.marked.insert(path);
        }
        self.move_cursor(true);
    }

    fn cursor_row(&self) -> Option<&dao::Row> {
        self.table_state
            .selected()
            .and_then(|i| self.data.rows.get(i))
    }

    fn move_cursor(&mut self, down: bool) {
        let n = self.data.rows.len();
        if n == 0 {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        let next = if down {
            (current + 1) % n
        } else if current == 0 {
            n - 1
        } else {
            current - 1
        };
        self.table_state.select(Some(next));
    }
}

impl SelectionSource for ResourceTable {
    fn selected_items(&self) -> Vec<String> {
        if self.marked.is_empty() {
            return self.cursor_row().map(|r| vec![r.path.clone()]).unwrap_or_default();
        }
        self.data
            .rows
            .iter()
            .filter(|r| self.marked.contains(&r.path))
            .map(|r| r.path.clone())
            .collect()
    }

    fn header_index(&self, column: &str) -> Option<usize> {
        self.data.header_index(column)
    }

    /// Cell of the selected row. With exactly one mark that is the marked
    /// row, wherever the cursor has moved since.
    fn selected_cell(&self, column: usize) -> Option<String> {
        let row = match self.marked.len() {
            0 => self.cursor_row(),
            1 => self
                .data
                .rows
                .iter()
                .find(|r| self.marked.contains(&r.path)),
            _ => self.cursor_row(),
        };
        row.and_then(|r| r.cells.get(column).cloned())
    }
}

impl Component for ResourceTable {
    fn handle_key_event(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_cursor(false);
                Action::ScrollUp
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_cursor(true);
                Action::ScrollDown
            }
            KeyCode::Char(' ') => {
                self.toggle_mark();
                Action::ToggleMark
            }
            _ => Action::Noop,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let title = format!(" {}({}) ", self.gvr.resource(), self.data.rows.len());

        if self.data.rows.is_empty() {
            let empty = Paragraph::new(format!("No {} found", self.gvr.resource()))
                .style(
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::DIM),
                )
                .block(Block::default().borders(Borders::ALL).title(title));
            frame.render_widget(empty, area);
            return;
        }

        let paused_idx = self.data.header_index(PAUSED_COLUMN);
        let header = Row::new(
            self.data
                .header
                .iter()
                .map(|h| Cell::from(h.as_str()).style(theme::HEADER)),
        )
        .height(1);

        let rows: Vec<Row> = self
            .data
            .rows
            .iter()
            .map(|r| {
                let cells = r.cells.iter().enumerate().map(|(i, c)| {
                    if Some(i) == paused_idx && c == "true" {
                        Cell::from(Span::styled(c.clone(), theme::WARNING))
                    } else {
                        Cell::from(c.clone())
                    }
                });
                let row = Row::new(cells);
                if self.marked.contains(&r.path) {
                    row.style(theme::MARKED)
                } else {
                    row
                }
            })
            .collect();

        let widths = vec![Constraint::Fill(1); self.data.header.len().max(1)];
        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(title))
            .row_highlight_style(theme::SELECTED);

        let mut table_state = self.table_state.clone();
        frame.render_stateful_widget(table, area, &mut table_state);
    }
}
