//! # Chain Charts Library
//!
//! A Rust library for preparing blockchain explorer statistics charts.
//!
//! ## Features
//!
//! - Fetch precomputed metric series from an explorer's `/api/chart/{kind}` endpoints
//! - Reshape raw parallel-array payloads into ordered `[x, y, ...]` plot tuples
//! - Build per-chart display options, including the stacked bar-chart variants
//! - Data-driven dispatch registry mapping each chart kind to its transform/options pair
//! - Chart controller with an explicit loading state machine and last-requested-wins swaps
//! - Custom bar-plotting geometry behind a drawing-surface trait
//! - Configurable client with rate limiting, retries, and preset configurations
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chain_charts_lib::{prepare_chart, ChartDataClient, ChartKind};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ChartDataClient::builder()
//!         .public_explorer_config()
//!         .base_url("https://explorer.dcrdata.org")
//!         .build()?;
//!
//!     // Fetch the raw series for one chart kind
//!     let payload = client.fetch_chart(ChartKind::TicketPrice).await?;
//!
//!     // Reshape it into plot tuples and build the display options
//!     let (points, options) = prepare_chart(ChartKind::TicketPrice, &payload);
//!
//!     println!("Chart: {}", options.title);
//!     println!("Samples: {}", points.len());
//!     println!("First tuple: {}", serde_json::to_string(&points[0])?);
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod options;
pub mod registry;
pub mod render;
pub mod transform;
pub mod types;

// Re-export main types for convenience
pub use client::{ChartDataClient, ClientBuilder};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use controller::{ChartController, ChartSurface, ControllerState, Selection};
pub use error::{ChartDataError, ErrorExt, Result};
pub use logging::{init_logging, init_test_logging, LogFormat, LoggingConfig};
pub use options::{base_options, format_legend, ChartOptions, Color, LegendSeries, Plotter};
pub use registry::{chart_def, prepare_chart, ChartDef, CHARTS};
pub use render::{draw_bars, CanvasPoint, DrawingSurface};
pub use types::{ChartKind, MetricsPayload, PlotPoint, PlotX};
