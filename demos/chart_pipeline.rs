//! Offline walkthrough of the chart preparation pipeline: payload in,
//! plot tuples and display options out, no explorer endpoint needed.

use anyhow::Result;
use chain_charts_lib::{
    draw_bars, format_legend, prepare_chart, CanvasPoint, ChartKind, Color, DrawingSurface,
    LegendSeries, MetricsPayload, Plotter,
};
use serde_json::json;

struct PrintingSurface;

impl DrawingSurface for PrintingSurface {
    fn set_fill_color(&mut self, color: Color) {
        println!("   fill color <- {color}");
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        println!("   fill   rect at ({x}, {y}) size {width}x{height}");
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        println!("   stroke rect at ({x}, {y}) size {width}x{height}");
    }
}

fn main() -> Result<()> {
    println!("Chart Preparation Pipeline");
    println!("==========================\n");

    // 1. TIME-INDEXED CHART
    println!("TIME-INDEXED CHART (ticket-price)");
    println!("---------------------------------");
    let payload: MetricsPayload = serde_json::from_value(json!({
        "time": [1_500_000_000, 1_500_000_300, 1_500_000_600],
        "valuef": [95.2, 96.8, 94.1]
    }))?;

    let (points, options) = prepare_chart(ChartKind::TicketPrice, &payload);
    println!("Title: {}", options.title);
    println!("Tuples (x in epoch milliseconds):");
    for point in &points {
        println!("   {}", serde_json::to_string(point)?);
    }

    // 2. FILTERED CHART
    println!("\nFILTERED CHART (duration-btw-blocks)");
    println!("------------------------------------");
    let payload: MetricsPayload = serde_json::from_value(json!({
        "value": [0, 600, 0, 480],
        "valuef": [1, 1, 1, 2]
    }))?;

    let (points, _) = prepare_chart(ChartKind::DurationBtwBlocks, &payload);
    println!("4 samples in, {} tuples out (zero durations dropped):", points.len());
    for point in &points {
        println!("   {}", serde_json::to_string(point)?);
    }

    // 3. STACKED CHART
    println!("\nSTACKED CHART (ticket-spend-type)");
    println!("---------------------------------");
    let payload: MetricsPayload = serde_json::from_value(json!({
        "height": [1000, 1001, 1002],
        "unspent": [12, 11, 13],
        "revoked": [1, 0, 2],
        "voted": [5, 6, 4]
    }))?;

    let (points, options) = prepare_chart(ChartKind::TicketSpendType, &payload);
    println!("Series: {}", options.labels.join(", "));
    println!(
        "Plotter: {}",
        match options.plotter {
            Plotter::Line => "line",
            Plotter::Bar => "custom bars",
        }
    );
    println!("Fill: {}, Stacked: {}", options.fill_graph, options.stacked_graph);
    let palette: Vec<String> = options.colors.iter().map(ToString::to_string).collect();
    println!("Palette: {}", palette.join(", "));
    for point in &points {
        println!("   {}", serde_json::to_string(point)?);
    }

    // 4. BAR RENDERER GEOMETRY
    println!("\nBAR RENDERER");
    println!("------------");
    println!("Drawing one series of 3 canvas points (baseline y = 100):");
    let canvas_points = [
        CanvasPoint::new(10.0, 40.0),
        CanvasPoint::new(25.0, 30.0),
        CanvasPoint::new(40.0, 55.0),
    ];
    draw_bars(Color::ORANGE, &canvas_points, 100.0, &mut PrintingSurface);

    // 5. LEGEND MARKUP
    println!("\nLEGEND MARKUP");
    println!("-------------");
    let series = vec![
        LegendSeries {
            label: "Unspent".to_string(),
            color: Color::ORANGE,
            value: "12".to_string(),
            dash: "--".to_string(),
        },
        LegendSeries {
            label: "Voted".to_string(),
            color: Color::GREEN,
            value: "5".to_string(),
            dash: "--".to_string(),
        },
    ];
    println!("Hovered: {}", format_legend("Block Height", Some("1000"), &series));
    println!("Not hovered: {:?}", format_legend("Block Height", None, &series));

    println!("\nPipeline walkthrough complete.");
    Ok(())
}
