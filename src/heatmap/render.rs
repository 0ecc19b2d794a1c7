//! Readiness-driven rendering
//!
//! The host populates its table asynchronously and hands the finished
//! content over a oneshot channel. Rendering starts only when that signal
//! arrives; if the host goes away first, nothing runs.

use log::{debug, info};
use tokio::sync::oneshot;

use super::cell::HeatCell;
use super::colorizer::{ApplyReport, HeatMapColorizer};
use super::column::ColumnConfig;
use super::errors::HeatMapError;
use super::options::HeatMapOptions;

/// Columns and cells discovered by the host once its content has settled.
#[derive(Debug, Clone, PartialEq)]
pub struct TableContent<C> {
    pub columns: Vec<ColumnConfig>,
    pub cells: Vec<C>,
}

impl<C> Default for TableContent<C> {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            cells: Vec::new(),
        }
    }
}

/// Sending half handed to whatever populates the table.
pub struct ContentReady<C> {
    tx: oneshot::Sender<TableContent<C>>,
}

impl<C> ContentReady<C> {
    /// Signal that the content is complete. Returns the content back if the
    /// renderer is no longer waiting.
    pub fn ready(self, content: TableContent<C>) -> Result<(), TableContent<C>> {
        self.tx.send(content)
    }
}

/// Receiving half awaited by the renderer.
pub struct ContentSignal<C> {
    rx: oneshot::Receiver<TableContent<C>>,
}

pub fn content_channel<C>() -> (ContentReady<C>, ContentSignal<C>) {
    let (tx, rx) = oneshot::channel();
    (ContentReady { tx }, ContentSignal { rx })
}

/// Output of a completed render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedTable<C> {
    pub content: TableContent<C>,
    pub report: ApplyReport,
}

#[derive(Debug, Default)]
pub struct HeatMapRenderer {
    colorizer: HeatMapColorizer,
}

impl HeatMapRenderer {
    pub fn new(options: HeatMapOptions) -> Self {
        Self {
            colorizer: HeatMapColorizer::new(options),
        }
    }

    pub fn colorizer(&self) -> &HeatMapColorizer {
        &self.colorizer
    }

    /// Run a full pass over already available content.
    pub fn render<C: HeatCell>(&mut self, mut content: TableContent<C>) -> RenderedTable<C> {
        if content.cells.is_empty() {
            debug!("No cells to color");
        }
        let report = self.colorizer.render(&content.columns, &mut content.cells);
        RenderedTable { content, report }
    }

    /// Wait for the host's readiness signal, then render.
    pub async fn render_when_ready<C: HeatCell>(
        &mut self,
        signal: ContentSignal<C>,
    ) -> Result<RenderedTable<C>, HeatMapError> {
        debug!("Waiting for table content");
        let content = signal.rx.await.map_err(|_| {
            info!("Table content abandoned before it was ready");
            HeatMapError::ContentAbandoned
        })?;
        Ok(self.render(content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::heatmap::cell::StyledCell;

    fn content() -> TableContent<StyledCell> {
        TableContent {
            columns: vec![ColumnConfig::with_color("score", Rgba::rgb(0x33, 0x66, 0xcc))],
            cells: vec![
                StyledCell::new("score", 0, "10"),
                StyledCell::new("score", 1, "100"),
            ],
        }
    }

    #[tokio::test]
    async fn test_renders_once_ready() {
        let (ready, signal) = content_channel();
        let populate = tokio::spawn(async move {
            tokio::task::yield_now().await;
            ready.ready(content()).is_ok()
        });

        let mut renderer = HeatMapRenderer::default();
        let rendered = renderer.render_when_ready(signal).await.unwrap();
        assert!(populate.await.unwrap());
        assert_eq!(rendered.report.styled, 2);
        assert_eq!(
            rendered.content.cells[1].background.unwrap().to_hex(),
            "#3366cc"
        );
    }

    #[tokio::test]
    async fn test_abandoned_content() {
        let (ready, signal) = content_channel::<StyledCell>();
        drop(ready);

        let mut renderer = HeatMapRenderer::default();
        let result = renderer.render_when_ready(signal).await;
        assert_eq!(result.unwrap_err(), HeatMapError::ContentAbandoned);
    }

    #[tokio::test]
    async fn test_empty_content_is_noop() {
        let (ready, signal) = content_channel::<StyledCell>();
        assert!(ready.ready(TableContent::default()).is_ok());

        let mut renderer = HeatMapRenderer::default();
        let rendered = renderer.render_when_ready(signal).await.unwrap();
        assert_eq!(rendered.report, ApplyReport::default());
        assert!(rendered.content.cells.is_empty());
    }

    #[test]
    fn test_ready_after_renderer_dropped() {
        let (ready, signal) = content_channel::<StyledCell>();
        drop(signal);
        assert!(ready.ready(content()).is_err());
    }
}
