use std::io;
use tracing_subscriber::{
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Available log formats
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON structured logging (best for production)
    Json,
    /// Pretty formatted logging (best for development)
    Pretty,
    /// Compact single-line logging
    Compact,
}

/// Logging configuration builder
pub struct LoggingConfig {
    level: String,
    format: LogFormat,
    include_location: bool,
}

impl LoggingConfig {
    pub fn new() -> Self {
        Self {
            level: "chain_charts_lib=info,warn".to_string(),
            format: LogFormat::Pretty,
            include_location: false,
        }
    }

    /// Filter directive, `RUST_LOG` syntax
    pub fn level(mut self, level: &str) -> Self {
        self.level = level.to_string();
        self
    }

    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Include file and line number in events
    pub fn include_location(mut self, include: bool) -> Self {
        self.include_location = include;
        self
    }

    /// Install the subscriber globally
    pub fn init(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let env_filter = EnvFilter::new(&self.level);

        match self.format {
            LogFormat::Json => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        fmt::layer()
                            .json()
                            .with_timer(ChronoUtc::rfc_3339())
                            .with_target(true)
                            .with_file(self.include_location)
                            .with_line_number(self.include_location)
                            .with_writer(io::stderr),
                    )
                    .try_init()?;
            }
            LogFormat::Pretty => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        fmt::layer()
                            .pretty()
                            .with_timer(ChronoUtc::rfc_3339())
                            .with_target(true)
                            .with_file(self.include_location)
                            .with_line_number(self.include_location)
                            .with_writer(io::stderr),
                    )
                    .try_init()?;
            }
            LogFormat::Compact => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        fmt::layer()
                            .compact()
                            .with_timer(ChronoUtc::rfc_3339())
                            .with_target(true)
                            .with_file(self.include_location)
                            .with_line_number(self.include_location)
                            .with_writer(io::stderr),
                    )
                    .try_init()?;
            }
        }

        tracing::info!("Logging initialized");
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Initialize logging with environment-driven defaults
///
/// Honors `RUST_LOG` when set. When `ENVIRONMENT` is `production` or
/// `prod`, events are emitted as JSON with source locations; otherwise
/// pretty formatting is used.
pub fn init_logging() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let level = std::env::var("RUST_LOG").unwrap_or_else(|_| "chain_charts_lib=info,warn".into());

    let is_production = std::env::var("ENVIRONMENT")
        .map(|env| env == "production" || env == "prod")
        .unwrap_or(false);

    let config = LoggingConfig::new().level(&level);
    if is_production {
        config.format(LogFormat::Json).include_location(true).init()
    } else {
        config.format(LogFormat::Pretty).init()
    }
}

/// Initialize minimal logging for tests
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("chain_charts_lib=debug"))
        .try_init();
}
