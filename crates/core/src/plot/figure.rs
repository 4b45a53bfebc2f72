use super::{PlotDescription, PlotWidget, RenderOutcome};
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintOutcome {
    /// The description equals the one on screen; nothing was drawn.
    Skipped,
    Rendered(RenderOutcome),
}

/// Binds one figure position to the widget currently showing it.
#[derive(Debug, Default)]
pub struct FigureSlot {
    widget: Option<PlotWidget>,
    current: Option<PlotDescription>,
}

impl FigureSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn widget(&self) -> Option<&PlotWidget> {
        self.widget.as_ref()
    }

    /// Shows `plot`, reusing the existing widget where possible.
    ///
    /// The first paint always renders; later paints are skipped when `plot`
    /// equals the description already displayed.
    pub fn paint(&mut self, plot: PlotDescription) -> Result<PaintOutcome> {
        if self.widget.is_some() && self.current.as_ref() == Some(&plot) {
            return Ok(PaintOutcome::Skipped);
        }

        let previous = self.widget.take();
        let previous_id = previous.as_ref().map(PlotWidget::id);
        let (outcome, widget) = plot.render(previous)?;
        if outcome == RenderOutcome::Replaced {
            if let Some(id) = previous_id {
                tracing::debug!(old = id.get(), new = widget.id().get(), "plot widget replaced");
            }
        }
        tracing::trace!(?outcome, kind = plot.kind(), "figure painted");

        self.widget = Some(widget);
        self.current = Some(plot);
        Ok(PaintOutcome::Rendered(outcome))
    }
}
