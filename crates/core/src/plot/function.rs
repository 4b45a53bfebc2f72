use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use super::{PlotSurface, PlotWidget, RenderOutcome};
use crate::{HarmonicError, Result};

type DrawFn = dyn Fn(&mut dyn PlotSurface) -> Result<()>;

/// Plot described by a drawing function.
///
/// Two `PlotFn`s are equal only when they share the same drawing callable.
/// Different callables that would draw the same picture compare unequal, and
/// a closure rebuilt on every render always triggers a redraw.
#[derive(Clone)]
pub struct PlotFn {
    draw: Rc<DrawFn>,
}

impl PlotFn {
    pub fn new(draw: impl Fn(&mut dyn PlotSurface) -> Result<()> + 'static) -> Self {
        Self {
            draw: Rc::new(draw),
        }
    }

    /// Builds a plot from a drawing function followed by extra decorations.
    pub fn figure(
        draw: impl Fn(&mut dyn PlotSurface) -> Result<()> + 'static,
        extras: impl IntoIterator<Item = PlotExtra>,
    ) -> Self {
        let extras: Vec<PlotExtra> = extras.into_iter().collect();
        Self::new(move |surface| {
            draw(&mut *surface)?;
            for extra in &extras {
                extra.apply(&mut *surface)?;
            }
            Ok(())
        })
    }

    pub fn draw(&self, surface: &mut dyn PlotSurface) -> Result<()> {
        (self.draw)(surface)
    }

    pub fn render(&self, current: Option<PlotWidget>) -> Result<(RenderOutcome, PlotWidget)> {
        match current {
            None => {
                let mut widget = PlotWidget::new();
                self.draw(&mut widget)?;
                Ok((RenderOutcome::Replaced, widget))
            }
            Some(mut widget) => {
                widget.clear_plots();
                self.draw(&mut widget)?;
                Ok((RenderOutcome::ReusedCleared, widget))
            }
        }
    }
}

impl PartialEq for PlotFn {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.draw, &other.draw)
    }
}

impl fmt::Debug for PlotFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PlotFn")
    }
}

/// Decoration applied after a figure's main drawing function.
#[derive(Clone)]
pub enum PlotExtra {
    Grid,
    Custom(Rc<DrawFn>),
}

impl PlotExtra {
    pub fn custom(draw: impl Fn(&mut dyn PlotSurface) -> Result<()> + 'static) -> Self {
        Self::Custom(Rc::new(draw))
    }

    fn apply(&self, surface: &mut dyn PlotSurface) -> Result<()> {
        match self {
            PlotExtra::Grid => {
                surface.show_grid(true, true);
                Ok(())
            }
            PlotExtra::Custom(draw) => draw(surface),
        }
    }
}

impl FromStr for PlotExtra {
    type Err = HarmonicError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "grid" => Ok(PlotExtra::Grid),
            other => Err(HarmonicError::argument(format!(
                "unknown plot extra `{other}`"
            ))),
        }
    }
}

impl fmt::Debug for PlotExtra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlotExtra::Grid => f.write_str("Grid"),
            PlotExtra::Custom(_) => f.write_str("Custom"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn creates_widget_then_clears_and_redraws() {
        let calls = Rc::new(Cell::new(0));
        let plot = PlotFn::new({
            let calls = calls.clone();
            move |surface| {
                calls.set(calls.get() + 1);
                surface.plot(&[0.0, 1.0], &[0.0, 1.0])
            }
        });

        let (outcome, widget) = plot.render(None).unwrap();
        assert_eq!(outcome, RenderOutcome::Replaced);
        let id = widget.id();

        let (outcome, widget) = plot.render(Some(widget)).unwrap();
        assert_eq!(outcome, RenderOutcome::ReusedCleared);
        assert_eq!(widget.id(), id);
        assert_eq!(widget.data_items().len(), 1);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn equality_follows_callable_identity() {
        let a = PlotFn::new(|_| Ok(()));
        let b = PlotFn::new(|_| Ok(()));
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn figure_applies_extras_after_drawing() {
        let extras = [
            "grid".parse::<PlotExtra>().unwrap(),
            PlotExtra::custom(|s| s.plot(&[2.0], &[2.0])),
        ];
        let plot = PlotFn::figure(|s| s.plot(&[1.0], &[1.0]), extras);

        let (_, widget) = plot.render(None).unwrap();
        assert_eq!(widget.grid(), (true, true));
        assert_eq!(widget.data_items().len(), 2);
        assert_eq!(widget.data_items()[1].x(), &[2.0]);
    }

    #[test]
    fn unknown_extra_is_rejected() {
        assert!(matches!(
            "legend".parse::<PlotExtra>(),
            Err(HarmonicError::Argument(_))
        ));
    }
}
