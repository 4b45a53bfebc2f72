use std::sync::atomic::{AtomicU64, Ordering};

use crate::{HarmonicError, Result};

/// Drawing operations a plot description may issue.
pub trait PlotSurface {
    /// Adds a line plot through the given points.
    fn plot(&mut self, x: &[f64], y: &[f64]) -> Result<()>;

    /// Removes every plotted series.
    fn clear_plots(&mut self);

    fn data_items(&self) -> &[DataItem];

    fn data_items_mut(&mut self) -> &mut [DataItem];

    fn show_grid(&mut self, x: bool, y: bool);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(u64);

static NEXT_WIDGET_ID: AtomicU64 = AtomicU64::new(1);

impl WidgetId {
    fn next() -> Self {
        Self(NEXT_WIDGET_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// One plotted line.
#[derive(Debug, Clone, PartialEq)]
pub struct DataItem {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl DataItem {
    fn new(x: &[f64], y: &[f64]) -> Result<Self> {
        check_lengths(x, y)?;
        Ok(Self {
            x: x.to_vec(),
            y: y.to_vec(),
        })
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Replaces the points without recreating the item.
    pub fn set_data(&mut self, x: &[f64], y: &[f64]) -> Result<()> {
        check_lengths(x, y)?;
        self.x.clear();
        self.x.extend_from_slice(x);
        self.y.clear();
        self.y.extend_from_slice(y);
        Ok(())
    }
}

fn check_lengths(x: &[f64], y: &[f64]) -> Result<()> {
    if x.len() != y.len() {
        return Err(HarmonicError::SeriesLength {
            x: x.len(),
            y: y.len(),
        });
    }
    Ok(())
}

/// In-memory plot widget owned by a figure slot.
#[derive(Debug)]
pub struct PlotWidget {
    id: WidgetId,
    items: Vec<DataItem>,
    grid: (bool, bool),
}

impl PlotWidget {
    pub fn new() -> Self {
        Self {
            id: WidgetId::next(),
            items: Vec::new(),
            grid: (false, false),
        }
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn grid(&self) -> (bool, bool) {
        self.grid
    }

    /// Smallest box containing every plotted point, as `(x_min, x_max,
    /// y_min, y_max)`. Non-finite values are skipped.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let mut bounds: Option<(f64, f64, f64, f64)> = None;
        for item in &self.items {
            for (&x, &y) in item.x.iter().zip(&item.y) {
                if !x.is_finite() || !y.is_finite() {
                    continue;
                }
                bounds = Some(match bounds {
                    None => (x, x, y, y),
                    Some((x0, x1, y0, y1)) => (x0.min(x), x1.max(x), y0.min(y), y1.max(y)),
                });
            }
        }
        bounds
    }
}

impl Default for PlotWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl PlotSurface for PlotWidget {
    fn plot(&mut self, x: &[f64], y: &[f64]) -> Result<()> {
        self.items.push(DataItem::new(x, y)?);
        Ok(())
    }

    fn clear_plots(&mut self) {
        self.items.clear();
    }

    fn data_items(&self) -> &[DataItem] {
        &self.items
    }

    fn data_items_mut(&mut self) -> &mut [DataItem] {
        &mut self.items
    }

    fn show_grid(&mut self, x: bool, y: bool) {
        self.grid = (x, y);
    }
}
