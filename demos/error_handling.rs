use chain_charts_lib::{
    ChartDataClient, ChartDataError, ChartKind, ErrorExt, LogFormat, LoggingConfig,
};
use std::time::Duration;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    LoggingConfig::new()
        .level("debug")
        .format(LogFormat::Pretty)
        .include_location(true)
        .init()
        .map_err(|e| format!("Failed to initialize logging: {}", e))?;

    info!("Starting error handling demonstration");

    info!("=== Test 1: Invalid Base URLs ===");
    test_invalid_base_urls();

    info!("=== Test 2: Invalid Headers ===");
    test_invalid_headers();

    info!("=== Test 3: Unknown Chart Kind ===");
    test_unknown_chart_kind();

    info!("=== Test 4: Unreachable Endpoint ===");
    test_unreachable_endpoint().await;

    info!("Error handling demonstration completed");
    Ok(())
}

fn test_invalid_base_urls() {
    for base_url in ["", "not-a-url", "ftp://explorer.test"] {
        info!(base_url = base_url, "Creating client with invalid base URL");

        match ChartDataClient::new(base_url) {
            Ok(_) => warn!(base_url = base_url, "Client creation succeeded unexpectedly"),
            Err(e) => {
                info!(error = %e, "Client creation failed as expected");
                log_error_details(&e);
            }
        }
    }
}

fn test_invalid_headers() {
    match ChartDataClient::builder()
        .base_url("https://explorer.dcrdata.org")
        .add_header("Invalid\nHeader", "value")
        .build()
    {
        Ok(_) => warn!("Client with invalid header built unexpectedly"),
        Err(e) => {
            info!(error = %e, "Invalid header rejected as expected");
            log_error_details(&e);
        }
    }
}

fn test_unknown_chart_kind() {
    match "ticket-prices".parse::<ChartKind>() {
        Ok(kind) => warn!(kind = %kind, "Unknown selector parsed unexpectedly"),
        Err(e) => {
            info!(error = %e, "Unknown selector rejected as expected");
            log_error_details(&e);
        }
    }
}

async fn test_unreachable_endpoint() {
    // Nothing listens on port 1, so the fetch fails fast
    let client = match ChartDataClient::builder()
        .base_url("http://127.0.0.1:1")
        .timeout(Duration::from_secs(2))
        .retry_attempts(1)
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "Failed to create client");
            return;
        }
    };

    match client.fetch_chart(ChartKind::TicketPrice).await {
        Ok(_) => warn!("Fetch succeeded unexpectedly"),
        Err(e) => {
            info!(error = %e, "Fetch failed as expected");
            log_error_details(&e);
        }
    }
}

fn log_error_details(e: &ChartDataError) {
    info!(
        retryable = e.is_retryable(),
        transient = e.is_transient(),
        config_error = e.is_config_error(),
        category = ?e.category(),
        "Error classification"
    );

    if let Some(delay) = e.retry_delay() {
        info!(delay_secs = delay.as_secs(), "Suggested retry delay");
    }

    for hint in e.debug_hints() {
        info!(hint = %hint, "Debug hint");
    }
}
