//! Custom bar plotter
//!
//! Drawing-time geometry for the two stacked ticket charts, kept behind a
//! minimal surface trait so the math is testable without a canvas. The
//! charting frontend owns all other drawing.

use crate::options::Color;

/// One plotted sample in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasPoint {
    pub canvas_x: f64,
    pub canvas_y: f64,
}

impl CanvasPoint {
    #[must_use]
    pub const fn new(canvas_x: f64, canvas_y: f64) -> Self {
        Self { canvas_x, canvas_y }
    }
}

/// The minimum a drawing surface must offer the bar plotter
pub trait DrawingSurface {
    fn set_fill_color(&mut self, color: Color);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
}

/// Draw one series as filled-and-stroked bars
///
/// Bar width is the floor of two-thirds of the minimum horizontal spacing
/// between consecutive points; each bar runs from the zero baseline
/// (`y_bottom`) up to the point's value and is filled with the series
/// color's white-averaged shade. Fewer than two points leave no finite
/// spacing to derive a width from, so nothing is drawn.
pub fn draw_bars(
    color: Color,
    points: &[CanvasPoint],
    y_bottom: f64,
    surface: &mut dyn DrawingSurface,
) {
    surface.set_fill_color(color.shaded());

    let mut min_sep = f64::INFINITY;
    for pair in points.windows(2) {
        let sep = pair[1].canvas_x - pair[0].canvas_x;
        if sep < min_sep {
            min_sep = sep;
        }
    }
    if !min_sep.is_finite() {
        return;
    }
    let bar_width = (2.0 / 3.0 * min_sep).floor();

    for point in points {
        let left = point.canvas_x - bar_width / 2.0;
        surface.fill_rect(left, point.canvas_y, bar_width, y_bottom - point.canvas_y);
        surface.stroke_rect(left, point.canvas_y, bar_width, y_bottom - point.canvas_y);
    }
}
