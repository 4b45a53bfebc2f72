use super::{PlotSurface, PlotWidget};

const MARKS: [char; 6] = ['*', '+', 'o', 'x', '#', '@'];

/// Rasterises a widget into a `width` x `height` character grid framed by
/// the y range. Each series gets its own mark; later series draw on top.
pub fn render_text(widget: &PlotWidget, width: usize, height: usize) -> String {
    let width = width.max(2);
    let height = height.max(2);
    let Some((x0, x1, y0, y1)) = widget.bounds() else {
        return format!("{:^width$}\n", "(empty plot)");
    };

    let mut grid = vec![vec![' '; width]; height];
    let (grid_x, grid_y) = widget.grid();
    if grid_x || grid_y {
        for (row, line) in grid.iter_mut().enumerate() {
            for (col, cell) in line.iter_mut().enumerate() {
                let on_x = grid_x && col % (width / 4).max(1) == 0;
                let on_y = grid_y && row % (height / 4).max(1) == 0;
                if on_x || on_y {
                    *cell = '.';
                }
            }
        }
    }

    let scale = |value: f64, lo: f64, hi: f64, cells: usize| -> usize {
        if hi - lo <= f64::EPSILON {
            return cells / 2;
        }
        let t = (value - lo) / (hi - lo);
        ((t * (cells - 1) as f64).round() as usize).min(cells - 1)
    };

    for (index, item) in widget.data_items().iter().enumerate() {
        let mark = MARKS[index % MARKS.len()];
        for (&x, &y) in item.x().iter().zip(item.y()) {
            if !x.is_finite() || !y.is_finite() {
                continue;
            }
            let col = scale(x, x0, x1, width);
            let row = height - 1 - scale(y, y0, y1, height);
            grid[row][col] = mark;
        }
    }

    let top = format!("{y1:>8.3} ");
    let bottom = format!("{y0:>8.3} ");
    let blank = " ".repeat(top.len());
    let mut out = String::new();
    for (row, line) in grid.iter().enumerate() {
        let prefix = if row == 0 {
            &top
        } else if row == height - 1 {
            &bottom
        } else {
            &blank
        };
        out.push_str(prefix);
        out.push('|');
        out.extend(line.iter());
        out.push_str("|\n");
    }
    out.push_str(&format!(
        "{blank} {x0:<w$.3}{x1:>w$.3}\n",
        w = width / 2
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_widget_renders_placeholder() {
        let text = render_text(&PlotWidget::new(), 20, 4);
        assert!(text.contains("(empty plot)"));
    }

    #[test]
    fn draws_each_series_with_its_own_mark() {
        let mut widget = PlotWidget::new();
        widget.plot(&[0.0, 1.0], &[0.0, 0.0]).unwrap();
        widget.plot(&[0.0, 1.0], &[1.0, 1.0]).unwrap();

        let text = render_text(&widget, 10, 5);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].contains('+'));
        assert!(lines[4].contains('*'));
        assert!(lines[0].starts_with("   1.000 |"));
    }
}
