//! Event handling for the viewer
//!
//! Terminal input is polled on a background task; table loading and heat
//! map rendering report back through the same channel.

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::heatmap::{HeatMapError, RenderedTable, StyledCell};
use crate::table::HeatTable;

/// Application events
#[derive(Debug)]
pub enum Event {
    /// Periodic tick for status expiry and the loading spinner
    Tick,
    /// Keyboard event
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// The CSV table finished loading (or failed to)
    Loaded(Result<HeatTable, String>),
    /// A heat map pass completed (or its content was abandoned). Carries the
    /// generation the pass was started under.
    Rendered {
        generation: u64,
        result: Result<RenderedTable<StyledCell>, HeatMapError>,
    },
}

/// Event handler that polls for terminal events
pub struct EventHandler {
    tx: mpsc::UnboundedSender<Event>,
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Create a new event handler with the given tick rate in milliseconds
    pub fn new(tick_rate_ms: u64) -> Self {
        let tick_rate = Duration::from_millis(tick_rate_ms);
        let (tx, rx) = mpsc::unbounded_channel();
        let input_tx = tx.clone();

        tokio::spawn(async move {
            loop {
                let polled = tokio::task::block_in_place(|| {
                    if event::poll(tick_rate).unwrap_or(false) {
                        event::read().map(Some)
                    } else {
                        Ok(None)
                    }
                });
                let event = match polled {
                    Ok(Some(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                        Event::Key(key)
                    }
                    Ok(Some(CrosstermEvent::Resize(w, h))) => Event::Resize(w, h),
                    Ok(Some(_)) => continue,
                    Ok(None) => Event::Tick,
                    Err(_) => break,
                };
                if input_tx.send(event).is_err() {
                    break;
                }
            }
        });

        Self { tx, rx }
    }

    /// Sender for events produced outside the input loop
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.tx.clone()
    }

    /// Wait for the next event
    pub async fn next(&mut self) -> anyhow::Result<Event> {
        self.rx
            .recv()
            .await
            .ok_or_else(|| anyhow::anyhow!("Event channel closed"))
    }
}
