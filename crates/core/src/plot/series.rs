use serde::{Deserialize, Serialize};

use super::{PlotSurface, PlotWidget, RenderOutcome};
use crate::{HarmonicError, Result};

/// A sampled line: x values and the matching y values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Series {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self { x, y }
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// Largest finite y value.
    pub fn max_y(&self) -> Option<f64> {
        self.y
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
    }
}

/// Literal list of series to display.
///
/// Equality compares every value of every series, so data rebuilt on each
/// render still compares equal when nothing changed. NaN never compares equal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesData {
    series: Vec<Series>,
}

impl SeriesData {
    pub fn new(series: Vec<Series>) -> Self {
        Self { series }
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn plot(&self, surface: &mut dyn PlotSurface) -> Result<()> {
        for series in &self.series {
            surface.plot(&series.x, &series.y)?;
        }
        Ok(())
    }

    /// Updates every existing data item in place, pairing them by index.
    pub fn set_data(&self, surface: &mut dyn PlotSurface) -> Result<()> {
        let items = surface.data_items_mut();
        if items.len() != self.series.len() {
            return Err(HarmonicError::SeriesMismatch {
                expected: items.len(),
                found: self.series.len(),
            });
        }
        for (item, series) in items.iter_mut().zip(&self.series) {
            item.set_data(&series.x, &series.y)?;
        }
        Ok(())
    }

    pub fn render(&self, current: Option<PlotWidget>) -> Result<(RenderOutcome, PlotWidget)> {
        let Some(mut widget) = current else {
            let mut widget = PlotWidget::new();
            self.plot(&mut widget)?;
            return Ok((RenderOutcome::Replaced, widget));
        };

        if widget.data_items().len() != self.series.len() {
            widget.clear_plots();
            self.plot(&mut widget)?;
            return Ok((RenderOutcome::ReusedCleared, widget));
        }

        self.set_data(&mut widget)?;
        Ok((RenderOutcome::ReusedUpdated, widget))
    }
}

impl From<Vec<Series>> for SeriesData {
    fn from(series: Vec<Series>) -> Self {
        Self::new(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(y: &[f64]) -> Series {
        Series::new((0..y.len()).map(|i| i as f64).collect(), y.to_vec())
    }

    #[test]
    fn first_render_creates_widget() {
        let data = SeriesData::new(vec![line(&[1.0, 2.0]), line(&[3.0, 4.0])]);
        let (outcome, widget) = data.render(None).unwrap();
        assert_eq!(outcome, RenderOutcome::Replaced);
        assert_eq!(widget.data_items().len(), 2);
    }

    #[test]
    fn same_count_updates_data_in_place() {
        let (_, widget) = SeriesData::new(vec![line(&[1.0, 2.0])]).render(None).unwrap();
        let id = widget.id();

        let next = SeriesData::new(vec![line(&[5.0, 6.0, 7.0])]);
        let (outcome, widget) = next.render(Some(widget)).unwrap();
        assert_eq!(outcome, RenderOutcome::ReusedUpdated);
        assert_eq!(widget.id(), id);
        assert_eq!(widget.data_items()[0].y(), &[5.0, 6.0, 7.0]);
    }

    #[test]
    fn different_count_clears_and_replots() {
        let (_, widget) = SeriesData::new(vec![line(&[1.0])]).render(None).unwrap();
        let id = widget.id();

        let next = SeriesData::new(vec![line(&[1.0]), line(&[2.0]), line(&[3.0])]);
        let (outcome, widget) = next.render(Some(widget)).unwrap();
        assert_eq!(outcome, RenderOutcome::ReusedCleared);
        assert_eq!(widget.id(), id);
        assert_eq!(widget.data_items().len(), 3);
    }

    #[test]
    fn pairing_requires_matching_counts() {
        let mut widget = PlotWidget::new();
        widget.plot(&[0.0], &[0.0]).unwrap();
        let err = SeriesData::new(vec![]).set_data(&mut widget).unwrap_err();
        assert!(matches!(
            err,
            HarmonicError::SeriesMismatch {
                expected: 1,
                found: 0
            }
        ));
    }

    #[test]
    fn equality_is_by_value() {
        let a = SeriesData::new(vec![line(&[1.0, 2.0])]);
        let b = SeriesData::new(vec![line(&[1.0, 2.0])]);
        let c = SeriesData::new(vec![line(&[1.0, 2.5])]);
        let nan = SeriesData::new(vec![line(&[f64::NAN])]);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(nan, nan.clone());
    }

    #[test]
    fn reports_largest_value() {
        assert_eq!(line(&[0.5, f64::NAN, 2.0]).max_y(), Some(2.0));
        assert_eq!(Series::default().max_y(), None);
    }
}
