//! Chart display options
//!
//! Builds the display-options record the charting frontend consumes
//! verbatim: axis labels, title, draw style, palette, plotter selection.
//! The two stacked ticket charts apply a second-stage bar-style override
//! on top of the base record.

use serde::{Serialize, Serializer};
use std::fmt;

/// An RGB color, rendered as `rgb(r,g,b)` toward the frontend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    /// Default single-series line color
    pub const DEFAULT_LINE: Color = Color(0, 128, 127);
    pub const ORANGE: Color = Color(255, 165, 0);
    pub const RED: Color = Color(255, 0, 0);
    pub const GREEN: Color = Color(0, 153, 0);
    pub const PURPLE: Color = Color(153, 102, 255);

    /// The shade used for bar fills: each channel averaged toward white
    #[must_use]
    pub const fn shaded(self) -> Color {
        Color(
            ((255 + self.0 as u16) / 2) as u8,
            ((255 + self.1 as u16) / 2) as u8,
            ((255 + self.2 as u16) / 2) as u8,
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.0, self.1, self.2)
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Which drawing routine the frontend should use for a chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Plotter {
    /// The charting library's default line plotter
    Line,
    /// The custom bar plotter in [`crate::render`]
    Bar,
}

/// Display directives for one chart, consumed verbatim by the frontend
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    /// Series labels, x axis first
    pub labels: Vec<String>,
    pub draw_points: bool,
    pub y_label: String,
    pub x_label: String,
    pub title: String,
    /// Format large y values with K/M/B suffixes
    pub labels_kmb: bool,
    /// Format large y values with power-of-two suffixes
    pub labels_kmg2: bool,
    pub digits_after_decimal: u8,
    pub fill_graph: bool,
    pub stacked_graph: bool,
    pub show_range_selector: bool,
    pub labels_separate_lines: bool,
    pub colors: Vec<Color>,
    pub plotter: Plotter,
}

/// Base options shared by every chart kind: line plotter, no fill, no
/// stacking, the default palette, eight digits after the decimal
#[must_use]
pub fn base_options(
    labels: &[&str],
    draw_points: bool,
    y_label: &str,
    x_label: &str,
    title: &str,
    labels_kmb: bool,
    labels_kmg2: bool,
) -> ChartOptions {
    ChartOptions {
        labels: labels.iter().map(|&label| label.to_string()).collect(),
        draw_points,
        y_label: y_label.to_string(),
        x_label: x_label.to_string(),
        title: title.to_string(),
        labels_kmb,
        labels_kmg2,
        digits_after_decimal: 8,
        fill_graph: false,
        stacked_graph: false,
        show_range_selector: false,
        labels_separate_lines: false,
        colors: vec![Color::DEFAULT_LINE],
        plotter: Plotter::Line,
    }
}

impl ChartOptions {
    /// Second-stage override for the stacked ticket charts: fill and
    /// stacking on, fixed palette, bar plotter
    #[must_use]
    pub fn with_bar_style(mut self, colors: Vec<Color>) -> Self {
        self.fill_graph = true;
        self.stacked_graph = true;
        self.colors = colors;
        self.plotter = Plotter::Bar;
        self
    }

    /// Fixed configuration for the eager first draw (ticket price with the
    /// range selector and per-line legend labels)
    #[must_use]
    pub fn initial() -> Self {
        let mut options = base_options(
            &["Date", "Price"],
            true,
            "Price (Decred)",
            "Date",
            "Ticket Price Chart",
            false,
            false,
        );
        options.show_range_selector = true;
        options.labels_separate_lines = true;
        options
    }
}

/// One series' entry in a hovered legend
#[derive(Debug, Clone, PartialEq)]
pub struct LegendSeries {
    pub label: String,
    pub color: Color,
    /// Rendered y value
    pub value: String,
    /// Dash marker markup
    pub dash: String,
}

/// Legend formatter shared by every chart kind
///
/// `x_value` is absent when no sample is hovered, which yields an empty
/// legend.
#[must_use]
pub fn format_legend(x_label: &str, x_value: Option<&str>, series: &[LegendSeries]) -> String {
    let Some(x) = x_value else {
        return String::new();
    };

    let mut html = format!("{x_label}: {x}");
    for entry in series {
        html.push_str(&format!(
            "<br>{} <span style=\"color: {};\">{}: {}</span>",
            entry.dash, entry.color, entry.label, entry.value
        ));
    }
    html
}
