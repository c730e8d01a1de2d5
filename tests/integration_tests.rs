use chain_charts_lib::{
    prepare_chart, ChartController, ChartDataClient, ChartDataError, ChartKind, ChartOptions,
    ChartSurface, ControllerState, ErrorExt, LogFormat, LoggingConfig, MetricsPayload, PlotPoint,
    Selection,
};
use chain_charts_lib::error::ErrorCategory;
use serde_json::json;
use std::time::Duration;
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

fn ticket_price_body() -> serde_json::Value {
    json!({
        "time": [1000, 2000],
        "valuef": [4.5, 5.0]
    })
}

#[derive(Default)]
struct RecordingSurface {
    applied: Vec<(usize, ChartOptions)>,
    loading: Vec<bool>,
}

impl ChartSurface for RecordingSurface {
    fn apply(&mut self, data: &[PlotPoint], options: &ChartOptions) {
        self.applied.push((data.len(), options.clone()));
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading.push(loading);
    }
}

#[tokio::test]
async fn test_client_creation() {
    let client = ChartDataClient::builder()
        .base_url("https://explorer.dcrdata.org")
        .timeout(Duration::from_secs(30))
        .retry_attempts(3)
        .build();

    assert!(client.is_ok());
}

#[tokio::test]
async fn test_client_builder_configuration() {
    let client = ChartDataClient::builder()
        .base_url("https://custom-explorer.test")
        .timeout(Duration::from_secs(60))
        .retry_attempts(5)
        .rate_limit(10)
        .max_concurrent_requests(8)
        .add_header("Authorization", "Bearer token")
        .build()
        .unwrap();

    assert_eq!(client.base_url(), "https://custom-explorer.test");
}

#[tokio::test]
async fn test_preset_configurations() {
    let configs = [
        ChartDataClient::builder().public_explorer_config(),
        ChartDataClient::builder().local_node_config(),
    ];

    for config_builder in configs {
        let client = config_builder.base_url("https://explorer.test").build();
        assert!(client.is_ok());
    }
}

#[tokio::test]
async fn test_auto_config_detection() {
    let local_client = ChartDataClient::builder()
        .auto_config("http://127.0.0.1:7777")
        .build();
    assert!(local_client.is_ok());

    let public_client = ChartDataClient::builder()
        .auto_config("https://explorer.dcrdata.org")
        .build();
    assert!(public_client.is_ok());
}

#[tokio::test]
async fn test_fetch_chart_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/chart/ticket-price"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&ticket_price_body()))
        .mount(&mock_server)
        .await;

    let client = ChartDataClient::new(&mock_server.uri()).unwrap();

    let payload = client.fetch_chart(ChartKind::TicketPrice).await.unwrap();
    assert_eq!(payload.time, vec![1000, 2000]);
    assert_eq!(payload.valuef, vec![4.5, 5.0]);
    assert!(payload.height.is_empty());

    // The fetched payload flows straight through the dispatch registry
    let (points, options) = prepare_chart(ChartKind::TicketPrice, &payload);
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].x.timestamp_millis(), Some(1_000_000));
    assert_eq!(points[0].y(), 4.5);
    assert_eq!(options.title, "Ticket Price Chart");
}

#[tokio::test]
async fn test_fetch_chart_requests_kind_path() {
    let mock_server = MockServer::start().await;

    // Only the requested kind's endpoint is mounted; any other path would 404
    Mock::given(method("GET"))
        .and(path("/api/chart/duration-btw-blocks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "value": [0, 600, 0, 480],
            "valuef": [1, 1, 1, 2]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ChartDataClient::new(&mock_server.uri()).unwrap();

    let payload = client
        .fetch_chart(ChartKind::DurationBtwBlocks)
        .await
        .unwrap();

    let (points, _) = prepare_chart(ChartKind::DurationBtwBlocks, &payload);
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].x.as_height(), Some(600));
    assert_eq!(points[1].x.as_height(), Some(480));
}

#[tokio::test]
async fn test_fetch_chart_http_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/chart/coin-supply"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = ChartDataClient::builder()
        .base_url(&mock_server.uri())
        .retry_attempts(1)
        .build()
        .unwrap();

    let result = client.fetch_chart(ChartKind::CoinSupply).await;
    assert!(matches!(result, Err(ChartDataError::Http { .. })));
}

#[tokio::test]
async fn test_server_error_retries_then_succeeds() {
    let mock_server = MockServer::start().await;

    // First attempt gets a 500, the retry gets the real payload
    Mock::given(method("GET"))
        .and(path("/api/chart/ticket-price"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/chart/ticket-price"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&ticket_price_body()))
        .mount(&mock_server)
        .await;

    let client = ChartDataClient::builder()
        .base_url(&mock_server.uri())
        .retry_attempts(3)
        .build()
        .unwrap();

    let payload = client.fetch_chart(ChartKind::TicketPrice).await.unwrap();
    assert_eq!(payload.time.len(), 2);
}

#[tokio::test]
async fn test_rate_limiting_behavior() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/chart/ticket-price"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "1"))
        .mount(&mock_server)
        .await;

    let client = ChartDataClient::builder()
        .base_url(&mock_server.uri())
        .retry_attempts(1)
        .build()
        .unwrap();

    let result = client.fetch_chart(ChartKind::TicketPrice).await;

    match result {
        Err(ChartDataError::RateLimit { retry_after }) => {
            assert_eq!(retry_after, Some(Duration::from_secs(1)));
        }
        other => panic!("Expected RateLimit error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_invalid_json_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/chart/ticket-price"))
        .respond_with(ResponseTemplate::new(200).set_body_string("invalid json"))
        .mount(&mock_server)
        .await;

    let client = ChartDataClient::new(&mock_server.uri()).unwrap();

    let result = client.fetch_chart(ChartKind::TicketPrice).await;
    match result {
        Err(e @ ChartDataError::ResponseParsing { .. }) => {
            assert!(!e.is_retryable());
            assert_eq!(e.category(), ErrorCategory::Api);
        }
        other => panic!("Expected ResponseParsing error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_empty_payload_yields_no_data() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/chart/tx-per-day"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({})))
        .mount(&mock_server)
        .await;

    let client = ChartDataClient::new(&mock_server.uri()).unwrap();

    let result = client.fetch_chart(ChartKind::TxPerDay).await;
    match result {
        Err(ChartDataError::NoData { kind, .. }) => {
            assert_eq!(kind, ChartKind::TxPerDay);
        }
        other => panic!("Expected NoData error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_request_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/chart/ticket-price"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(10)))
        .mount(&mock_server)
        .await;

    let client = ChartDataClient::builder()
        .base_url(&mock_server.uri())
        .timeout(Duration::from_millis(500))
        .retry_attempts(1)
        .build()
        .unwrap();

    let result = client.fetch_chart(ChartKind::TicketPrice).await;
    assert!(result.is_err());

    if let Err(e) = result {
        assert!(e.is_retryable());
        assert!(e.is_transient());
        assert!(!e.is_config_error());
        assert_eq!(e.category(), ErrorCategory::Network);
    }
}

#[tokio::test]
async fn test_custom_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/chart/ticket-price"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&ticket_price_body()))
        .mount(&mock_server)
        .await;

    let client = ChartDataClient::builder()
        .base_url(&mock_server.uri())
        .add_header("Authorization", "Bearer test-token")
        .build()
        .unwrap();

    let result = client.fetch_chart(ChartKind::TicketPrice).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_fetch_charts_batch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/chart/ticket-price"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&ticket_price_body()))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/chart/tx-per-block"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "value": [10, 11],
            "count": [3, 8]
        })))
        .mount(&mock_server)
        .await;

    // No mock for coin-supply, so that fetch fails with a 404
    let client = ChartDataClient::builder()
        .base_url(&mock_server.uri())
        .retry_attempts(1)
        .build()
        .unwrap();

    let results = client
        .fetch_charts(&[
            ChartKind::TicketPrice,
            ChartKind::TxPerBlock,
            ChartKind::CoinSupply,
        ])
        .await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].0, ChartKind::TicketPrice);
    assert!(results[0].1.is_ok());
    assert_eq!(results[1].0, ChartKind::TxPerBlock);
    assert!(results[1].1.is_ok());
    assert_eq!(results[2].0, ChartKind::CoinSupply);
    assert!(results[2].1.is_err());
}

#[tokio::test]
async fn test_controller_initial_draw() {
    let client = ChartDataClient::new("http://127.0.0.1:1").unwrap();
    let initial: MetricsPayload = serde_json::from_value(ticket_price_body()).unwrap();

    let controller = ChartController::new(client, RecordingSurface::default(), &initial);

    assert_eq!(controller.current_kind(), ChartKind::TicketPrice);
    assert_eq!(controller.state(), ControllerState::Idle);

    let surface = controller.surface();
    assert_eq!(surface.applied.len(), 1);
    assert!(surface.loading.is_empty());
    assert!(surface.applied[0].1.show_range_selector);
}

#[tokio::test]
async fn test_controller_select_redraws() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/chart/coin-supply"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "time": [1000, 2000, 3000],
            "valuef": [100.0, 200.0, 300.0]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ChartDataClient::new(&mock_server.uri()).unwrap();
    let initial: MetricsPayload = serde_json::from_value(ticket_price_body()).unwrap();
    let mut controller = ChartController::new(client, RecordingSurface::default(), &initial);

    let outcome = controller.select(ChartKind::CoinSupply).await.unwrap();

    assert_eq!(outcome, Selection::Redrawn(ChartKind::CoinSupply));
    assert_eq!(controller.current_kind(), ChartKind::CoinSupply);
    assert_eq!(controller.state(), ControllerState::Idle);

    let surface = controller.surface();
    assert_eq!(surface.loading, vec![true, false]);
    assert_eq!(surface.applied.len(), 2);

    let (points, options) = &surface.applied[1];
    assert_eq!(*points, 3);
    assert_eq!(options.title, "Total Coin Supply Chart");
}

#[tokio::test]
async fn test_controller_same_kind_issues_no_fetch() {
    let mock_server = MockServer::start().await;

    // The current kind's endpoint must never be contacted
    Mock::given(method("GET"))
        .and(path("/api/chart/ticket-price"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&ticket_price_body()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = ChartDataClient::new(&mock_server.uri()).unwrap();
    let initial: MetricsPayload = serde_json::from_value(ticket_price_body()).unwrap();
    let mut controller = ChartController::new(client, RecordingSurface::default(), &initial);

    let outcome = controller.select(ChartKind::TicketPrice).await.unwrap();

    assert_eq!(outcome, Selection::Unchanged(ChartKind::TicketPrice));

    let surface = controller.surface();
    assert_eq!(surface.loading, vec![true, false]);
    assert_eq!(surface.applied.len(), 1);
}

#[tokio::test]
async fn test_controller_failure_keeps_previous_chart() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/chart/pow-difficulty"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = ChartDataClient::builder()
        .base_url(&mock_server.uri())
        .retry_attempts(1)
        .build()
        .unwrap();
    let initial: MetricsPayload = serde_json::from_value(ticket_price_body()).unwrap();
    let mut controller = ChartController::new(client, RecordingSurface::default(), &initial);

    let result = controller.select(ChartKind::PowDifficulty).await;

    assert!(result.is_err());
    assert_eq!(controller.current_kind(), ChartKind::TicketPrice);
    assert_eq!(controller.state(), ControllerState::Idle);

    let surface = controller.surface();
    // The loading indicator never stays stuck after a failure
    assert_eq!(surface.loading, vec![true, false]);
    assert_eq!(surface.applied.len(), 1);
}

#[tokio::test]
async fn test_controller_stacked_chart_switch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/chart/ticket-spend-type"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "height": [100, 101],
            "unspent": [5, 6],
            "revoked": [1, 0],
            "voted": [3, 4]
        })))
        .mount(&mock_server)
        .await;

    let client = ChartDataClient::new(&mock_server.uri()).unwrap();
    let initial: MetricsPayload = serde_json::from_value(ticket_price_body()).unwrap();
    let mut controller = ChartController::new(client, RecordingSurface::default(), &initial);

    controller.select(ChartKind::TicketSpendType).await.unwrap();

    let (points, options) = &controller.surface().applied[1];
    assert_eq!(*points, 2);
    assert!(options.fill_graph);
    assert!(options.stacked_graph);
    assert_eq!(options.labels, vec!["Block Height", "Unspent", "Revoked", "Voted"]);
}

#[tokio::test]
async fn test_configuration_validation() {
    let result = ChartDataClient::new("");
    assert!(result.is_err());

    if let Err(e) = result {
        assert!(e.is_config_error());
        assert!(!e.is_retryable());
    }

    let result = ChartDataClient::new("not-a-url");
    assert!(result.is_err());

    if let Err(e) = result {
        assert!(e.is_config_error());
        assert!(!e.is_retryable());
    }
}

#[tokio::test]
async fn test_unknown_chart_kind_parse() {
    let err = "ticket-prices".parse::<ChartKind>().unwrap_err();

    assert!(matches!(err, ChartDataError::UnknownChartKind { .. }));
    assert!(err.is_config_error());
    assert!(!err.is_retryable());
    assert!(err
        .debug_hints()
        .iter()
        .any(|hint| hint.contains("ChartKind::ALL")));
}

#[tokio::test]
async fn test_logging_configuration() {
    // May fail if a subscriber is already installed, which is fine in tests
    let config_result = LoggingConfig::new()
        .level("debug")
        .format(LogFormat::Json)
        .include_location(true)
        .init();

    let _ = config_result;
}
