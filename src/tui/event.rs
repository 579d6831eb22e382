use std::time::Duration;

use crossterm::event::{EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::crossterm::event::KeyEvent;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Events produced by the TUI event handler.
#[derive(Debug, Clone)]
pub enum Event {
    /// Periodic tick: flash expiry and table refresh.
    Tick,
    /// Time to redraw the UI.
    Render,
    Key(KeyEvent),
    Resize(u16, u16),
    /// The input stream ended or the handler was shut down.
    Quit,
}

/// Multiplexes terminal input, tick and render timers into one channel.
///
/// The reader task stops when the handler is dropped.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    shutdown: CancellationToken,
}

impl EventHandler {
    pub fn new(tick_rate: Duration, render_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let shutdown = CancellationToken::new();
        let stop = shutdown.clone();

        tokio::spawn(async move {
            let mut reader = EventStream::new();
            let mut tick_interval = tokio::time::interval(tick_rate);
            let mut render_interval = tokio::time::interval(render_rate);

            loop {
                let event = tokio::select! {
                    _ = stop.cancelled() => return,
                    maybe_event = reader.next() => match maybe_event {
                        Some(Ok(crossterm::event::Event::Key(key)))
                            if key.kind == KeyEventKind::Press =>
                        {
                            Event::Key(key)
                        }
                        Some(Ok(crossterm::event::Event::Resize(x, y))) => Event::Resize(x, y),
                        Some(Ok(_)) => continue,
                        Some(Err(err)) => {
                            tracing::warn!(error = %err, "Terminal input error");
                            continue;
                        }
                        None => Event::Quit,
                    },
                    _ = tick_interval.tick() => Event::Tick,
                    _ = render_interval.tick() => Event::Render,
                };
                let quit = matches!(event, Event::Quit);
                if tx.send(event).is_err() || quit {
                    return;
                }
            }
        });

        Self { rx, shutdown }
    }

    /// Wait for the next event. `Event::Quit` once the channel is closed.
    pub async fn next(&mut self) -> Event {
        self.rx.recv().await.unwrap_or(Event::Quit)
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
