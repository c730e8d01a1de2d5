use anyhow::Result;
use chain_charts_lib::{prepare_chart, ChartDataClient, ChartKind};

#[tokio::main]
async fn main() -> Result<()> {
    chain_charts_lib::init_logging()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    println!("Testing Chain Charts Library\n");

    let endpoint =
        std::env::var("EXPLORER_URL").unwrap_or_else(|_| "http://127.0.0.1:7777".to_string());

    // Create client with a preset matched to the endpoint host
    let client = ChartDataClient::builder().auto_config(&endpoint).build()?;

    println!("Fetching ticket price data from {endpoint}...");
    let payload = match client.fetch_chart(ChartKind::TicketPrice).await {
        Ok(payload) => payload,
        Err(e) => {
            println!("Fetch failed: {e}");
            println!("Set EXPLORER_URL to a running explorer endpoint and retry.");
            return Ok(());
        }
    };

    // Reshape the raw payload and build the display options
    let (points, options) = prepare_chart(ChartKind::TicketPrice, &payload);

    println!("\nChart: {}", options.title);
    println!("   Axes: {} / {}", options.x_label, options.y_label);
    println!("   Samples: {}", points.len());
    for point in points.iter().take(3) {
        println!("   {}", serde_json::to_string(point)?);
    }
    if points.len() > 3 {
        println!("   ... and {} more", points.len() - 3);
    }
    println!();

    // Fetch a handful of kinds concurrently
    let kinds = [
        ChartKind::CoinSupply,
        ChartKind::PowDifficulty,
        ChartKind::TxPerDay,
        ChartKind::TicketSpendType,
    ];
    println!("Fetching {} charts in one batch...", kinds.len());
    let results = client.fetch_charts(&kinds).await;

    for (kind, result) in results {
        match result {
            Ok(payload) => {
                let (points, options) = prepare_chart(kind, &payload);
                println!("   {kind}: {} samples, title \"{}\"", points.len(), options.title);
            }
            Err(e) => println!("   {kind}: failed ({e})"),
        }
    }

    println!("\nDone.");
    Ok(())
}
