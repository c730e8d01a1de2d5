use chain_charts_lib::{prepare_chart, ChartDataClient, ChartKind, Plotter, Result};
use clap::Parser;
use std::process;

/// Explorer Chart CLI - fetch a chart series and show the prepared plot data
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Explorer base URL
    #[arg(short, long, default_value = "http://127.0.0.1:7777")]
    endpoint: String,

    /// Chart kind to fetch (kebab-case, e.g. ticket-price)
    #[arg(short, long, default_value = "ticket-price")]
    chart: String,

    /// List the available chart kinds and exit
    #[arg(short, long)]
    list: bool,

    /// Use quiet output (minimal info)
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.list {
        for kind in ChartKind::ALL {
            println!("{kind}");
        }
        return;
    }

    if let Err(e) = run_cli(cli).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run_cli(cli: Cli) -> Result<()> {
    let kind: ChartKind = cli.chart.parse()?;

    let client = ChartDataClient::builder().auto_config(&cli.endpoint).build()?;

    if !cli.quiet {
        println!(
            "\x1b[36m[INFO]\x1b[0m Fetching {} from {}...",
            kind, cli.endpoint
        );
    }

    let payload = client.fetch_chart(kind).await?;
    let (points, options) = prepare_chart(kind, &payload);

    if cli.quiet {
        // Minimal output for scripts
        println!(
            "chart={} points={} plotter={:?} stacked={} fill={}",
            kind,
            points.len(),
            options.plotter,
            options.stacked_graph,
            options.fill_graph
        );
        return Ok(());
    }

    println!("\x1b[32m[SUCCESS]\x1b[0m Fetched {} samples\n", points.len());

    // Header
    println!("\x1b[1;35mEXPLORER CHART REPORT\x1b[0m");
    println!("═══════════════════════════════════");

    // Display options the frontend would receive
    println!("\n\x1b[1;34mCHART CONFIGURATION:\x1b[0m");
    println!("   Title: {}", options.title);
    println!("   X Axis: {}", options.x_label);
    println!("   Y Axis: {}", options.y_label);
    println!("   Series Labels: {}", options.labels.join(", "));
    println!(
        "   Plotter: {}",
        match options.plotter {
            Plotter::Line => "line",
            Plotter::Bar => "custom bars",
        }
    );
    println!("   Draw Points: {}", options.draw_points);
    println!("   Fill / Stacked: {} / {}", options.fill_graph, options.stacked_graph);
    let palette: Vec<String> = options.colors.iter().map(ToString::to_string).collect();
    println!("   Colors: {}", palette.join(", "));

    // Series summary
    println!("\n\x1b[1;33mSERIES SUMMARY:\x1b[0m");
    println!("   Samples: {}", points.len());

    if let (Some(first), Some(last)) = (points.first(), points.last()) {
        println!("   First Tuple: {}", serde_json::to_string(first).unwrap_or_default());
        println!("   Last Tuple: {}", serde_json::to_string(last).unwrap_or_default());

        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for point in &points {
            for &y in &point.ys {
                min_y = min_y.min(y);
                max_y = max_y.max(y);
            }
        }
        println!("   Y Range: {min_y} to {max_y}");
    }

    // A few leading tuples, the way the frontend would receive them
    println!("\n\x1b[1;32mPLOT DATA (first 5 tuples):\x1b[0m");
    for point in points.iter().take(5) {
        println!("   {}", serde_json::to_string(point).unwrap_or_default());
    }
    if points.len() > 5 {
        println!("   ... and {} more", points.len() - 5);
    }

    Ok(())
}
