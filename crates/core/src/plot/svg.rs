use std::error::Error;

use plotters::coord::Shift;
use plotters::prelude::*;

use super::{PlotSurface, PlotWidget};
use crate::{HarmonicError, Result};

const COLORS: [RGBColor; 6] = [BLUE, RED, GREEN, MAGENTA, CYAN, BLACK];

/// Renders a widget as an SVG document titled `title`.
///
/// Each series is drawn as a line in its own colour; the widget's grid
/// flags decide which mesh lines are shown.
pub fn render_svg(widget: &PlotWidget, title: &str, (width, height): (u32, u32)) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
        draw(&root, widget, title).map_err(|err| HarmonicError::Plot(err.to_string()))?;
    }
    Ok(svg)
}

fn draw(
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    widget: &PlotWidget,
    title: &str,
) -> std::result::Result<(), Box<dyn Error>> {
    root.fill(&WHITE)?;

    let (x0, x1, y0, y1) = widget.bounds().unwrap_or((-0.5, 0.5, -1.0, 1.0));
    let (x0, x1) = widen(x0, x1);
    let (y0, y1) = widen(y0, y1);
    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    {
        let mut mesh = chart.configure_mesh();
        let (grid_x, grid_y) = widget.grid();
        if !grid_x {
            mesh.disable_x_mesh();
        }
        if !grid_y {
            mesh.disable_y_mesh();
        }
        mesh.draw()?;
    }

    for (index, item) in widget.data_items().iter().enumerate() {
        let color = COLORS[index % COLORS.len()];
        let points = item.x().iter().copied().zip(item.y().iter().copied());
        chart.draw_series(LineSeries::new(points, &color))?;
    }

    root.present()?;
    Ok(())
}

/// Flat ranges get one unit of padding on each side.
fn widen(lo: f64, hi: f64) -> (f64, f64) {
    if hi - lo <= f64::EPSILON {
        (lo - 1.0, hi + 1.0)
    } else {
        (lo, hi)
    }
}
