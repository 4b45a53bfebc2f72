//! Plot descriptions and the widgets that display them.
//!
//! A figure in the view tree carries a [`PlotDescription`]: either a drawing
//! function ([`PlotFn`]) or a literal list of series ([`SeriesData`]). A
//! [`FigureSlot`] keeps the widget between renders and decides whether a new
//! description needs drawing at all.

mod figure;
mod function;
mod series;
mod surface;
mod svg;
mod text;

pub use figure::{FigureSlot, PaintOutcome};
pub use function::{PlotExtra, PlotFn};
pub use series::{Series, SeriesData};
pub use surface::{DataItem, PlotSurface, PlotWidget, WidgetId};
pub use svg::render_svg;
pub use text::render_text;

use crate::Result;

/// What happened to the widget during a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// A new widget was created; the previous one, if any, must be closed.
    Replaced,
    /// The widget was kept and every series drawn again.
    ReusedCleared,
    /// The widget was kept and its series data updated in place.
    ReusedUpdated,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlotDescription {
    Function(PlotFn),
    Series(SeriesData),
}

impl PlotDescription {
    pub fn render(&self, current: Option<PlotWidget>) -> Result<(RenderOutcome, PlotWidget)> {
        match self {
            PlotDescription::Function(plot) => plot.render(current),
            PlotDescription::Series(data) => data.render(current),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            PlotDescription::Function(_) => "function",
            PlotDescription::Series(_) => "series",
        }
    }
}

impl From<PlotFn> for PlotDescription {
    fn from(plot: PlotFn) -> Self {
        PlotDescription::Function(plot)
    }
}

impl From<SeriesData> for PlotDescription {
    fn from(data: SeriesData) -> Self {
        PlotDescription::Series(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_never_compare_equal() {
        let series = PlotDescription::from(SeriesData::default());
        let function = PlotDescription::from(PlotFn::new(|_| Ok(())));
        assert_ne!(series, function);
        assert_eq!(series.kind(), "series");
        assert_eq!(function.kind(), "function");
    }
}
