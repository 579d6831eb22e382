//! One-line flash message area, the TUI's feedback sink.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::Paragraph;

use super::Component;
use crate::error::BrowseError;
use crate::tui::theme;
use crate::view::FeedbackSink;

/// Ticks a message stays on screen (4 ticks per second).
const INFO_TTL: u8 = 12;
const ERR_TTL: u8 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Info,
    Err,
}

#[derive(Debug, Default)]
pub struct Flash {
    message: Option<(FlashLevel, String)>,
    message_ttl: u8,
}

impl Flash {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(&self) -> Option<(FlashLevel, &str)> {
        self.message.as_ref().map(|(l, m)| (*l, m.as_str()))
    }

    fn set(&mut self, level: FlashLevel, msg: String, ttl: u8) {
        self.message = Some((level, msg));
        self.message_ttl = ttl;
    }
}

impl FeedbackSink for Flash {
    fn info(&mut self, msg: String) {
        tracing::info!("{}", msg);
        self.set(FlashLevel::Info, msg, INFO_TTL);
    }

    fn err(&mut self, err: &BrowseError) {
        tracing::warn!(error = %err, "Flash error");
        self.set(FlashLevel::Err, err.to_string(), ERR_TTL);
    }
}

impl Component for Flash {
    fn update(&mut self) {
        if self.message_ttl > 0 {
            self.message_ttl -= 1;
            if self.message_ttl == 0 {
                self.message = None;
            }
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        if let Some((level, msg)) = &self.message {
            let style = match level {
                FlashLevel::Info => theme::SUCCESS,
                FlashLevel::Err => theme::ERROR,
            };
            frame.render_widget(Paragraph::new(msg.as_str()).style(style), area);
        }
    }
}
