use std::time::Duration;
use thiserror::Error;

use crate::types::ChartKind;

/// Error types for the chart data pipeline
///
/// Variants carry enough structure for callers to distinguish transport
/// failures from malformed data and configuration mistakes.
#[derive(Error, Debug)]
pub enum ChartDataError {
    /// HTTP client errors (network, DNS, connection issues)
    #[error("HTTP request failed: {source}")]
    Http {
        source: reqwest::Error,
        /// Additional context about the request that failed
        context: Option<String>,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON processing failed: {source}")]
    Json {
        source: serde_json::Error,
        /// The data that failed to serialize/deserialize (truncated if large)
        data_sample: Option<String>,
    },

    /// The endpoint answered but the body was not a usable metrics payload
    #[error("Failed to parse chart payload: {reason}")]
    ResponseParsing {
        /// Reason for parsing failure
        reason: String,
        /// Raw response content (truncated)
        response_sample: Option<String>,
        /// Expected response structure
        expected_structure: Option<String>,
    },

    /// Invalid configuration provided to the client
    #[error("Configuration error: {message}")]
    Config {
        /// Detailed error message
        message: String,
        /// Configuration field that caused the error
        field: Option<String>,
        /// Suggested fix
        suggestion: Option<String>,
    },

    /// The endpoint asked us to back off (HTTP 429)
    #[error("Rate limit exceeded by endpoint")]
    RateLimit {
        /// Time until the limit resets, when the endpoint said so
        retry_after: Option<Duration>,
    },

    /// Request timeout occurred
    #[error("Request timeout after {duration:?}")]
    Timeout {
        /// Duration after which timeout occurred
        duration: Duration,
        /// Operation that timed out
        operation: String,
        /// Whether this was a connection timeout or read timeout
        timeout_type: TimeoutType,
    },

    /// A selector string that names no known chart kind
    #[error("Unknown chart kind: {value}")]
    UnknownChartKind {
        /// The unrecognized value
        value: String,
    },

    /// The endpoint returned a payload with no samples at all
    #[error("No chart data available for {kind}")]
    NoData {
        /// Chart kind that was requested
        kind: ChartKind,
        /// Reason why no data is available, if known
        reason: Option<String>,
    },

    /// Retry attempts exhausted
    #[error("Operation failed after {attempts} retry attempts over {total_duration:?}")]
    RetryExhausted {
        /// Number of retry attempts made
        attempts: u32,
        /// Total time spent retrying
        total_duration: Duration,
        /// The last error that occurred
        last_error: Box<ChartDataError>,
        /// All errors encountered during retries
        error_history: Vec<String>,
    },

    /// Connection failed to the explorer endpoint
    #[error("Failed to connect to endpoint: {endpoint}")]
    ConnectionFailed {
        /// Endpoint base URL
        endpoint: String,
        /// Underlying connection error
        source: Box<dyn std::error::Error + Send + Sync>,
        /// Whether the endpoint appears to be reachable
        endpoint_reachable: Option<bool>,
    },
}

/// Types of timeout errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeoutType {
    /// Connection timeout (failed to establish connection)
    Connection,
    /// Read timeout (connection established but no response)
    Read,
    /// Overall request timeout
    Request,
}

/// Error categories for filtering and handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Network-related errors (retryable)
    Network,
    /// Configuration errors (not retryable)
    Configuration,
    /// Data validation errors (not retryable)
    Validation,
    /// Endpoint/payload errors (may be retryable)
    Api,
    /// Rate limiting (retryable after delay)
    RateLimit,
}

/// Trait for additional error context and handling hints
pub trait ErrorExt {
    /// Whether this error is likely to be resolved by retrying
    fn is_retryable(&self) -> bool;

    /// Whether this error indicates a configuration problem
    fn is_config_error(&self) -> bool;

    /// Whether this error is transient (temporary)
    fn is_transient(&self) -> bool;

    /// Get suggested retry delay if error is retryable
    fn retry_delay(&self) -> Option<Duration>;

    /// Get error category for filtering
    fn category(&self) -> ErrorCategory;

    /// Get debugging hints for developers
    fn debug_hints(&self) -> Vec<String>;
}

impl ErrorExt for ChartDataError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Http { source, .. } => {
                source.is_timeout()
                    || source.is_connect()
                    || source.status().map_or(true, |s| s.is_server_error())
            }
            Self::Timeout { .. } | Self::RateLimit { .. } | Self::ConnectionFailed { .. } => true,
            Self::Json { .. }
            | Self::Config { .. }
            | Self::UnknownChartKind { .. }
            | Self::NoData { .. }
            | Self::RetryExhausted { .. }
            | Self::ResponseParsing { .. } => false,
        }
    }

    fn is_config_error(&self) -> bool {
        matches!(self, Self::Config { .. } | Self::UnknownChartKind { .. })
    }

    fn is_transient(&self) -> bool {
        match self {
            Self::Http { source, .. } => source.is_timeout() || source.is_connect(),
            Self::Timeout { .. } | Self::RateLimit { .. } | Self::ConnectionFailed { .. } => true,
            _ => false,
        }
    }

    fn retry_delay(&self) -> Option<Duration> {
        match self {
            Self::RateLimit { retry_after } => retry_after.or(Some(Duration::from_secs(60))),
            Self::Timeout { .. } => Some(Duration::from_secs(5)),
            Self::ConnectionFailed { .. } => Some(Duration::from_secs(2)),
            Self::Http { source, .. } if source.is_timeout() => Some(Duration::from_secs(3)),
            _ if self.is_retryable() => Some(Duration::from_secs(1)),
            _ => None,
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Http { .. } | Self::ConnectionFailed { .. } | Self::Timeout { .. } => {
                ErrorCategory::Network
            }
            Self::Config { .. } => ErrorCategory::Configuration,
            Self::UnknownChartKind { .. } => ErrorCategory::Validation,
            Self::ResponseParsing { .. } | Self::Json { .. } | Self::NoData { .. } => {
                ErrorCategory::Api
            }
            Self::RateLimit { .. } => ErrorCategory::RateLimit,
            Self::RetryExhausted { last_error, .. } => last_error.category(),
        }
    }

    fn debug_hints(&self) -> Vec<String> {
        let mut hints = Vec::new();

        match self {
            Self::Http { source, .. } => {
                if source.is_timeout() {
                    hints.push("Try increasing timeout duration".to_string());
                    hints.push("Check network connectivity".to_string());
                } else if source.is_connect() {
                    hints.push("Verify the explorer base URL is correct".to_string());
                    hints.push("Check if the explorer service is running".to_string());
                }
            }
            Self::RateLimit { .. } => {
                hints.push("Reduce request frequency with the client rate limiter".to_string());
                hints.push("Honor the Retry-After delay before the next request".to_string());
            }
            Self::Config {
                suggestion: Some(suggestion),
                ..
            } => {
                hints.push(suggestion.clone());
            }
            Self::UnknownChartKind { .. } => {
                hints.push("Use one of the kebab-case kinds listed by ChartKind::ALL".to_string());
            }
            Self::ResponseParsing { expected_structure, .. } => {
                hints.push("Check the explorer API version".to_string());
                if let Some(expected) = expected_structure {
                    hints.push(format!("Expected: {expected}"));
                }
            }
            Self::Timeout {
                timeout_type,
                duration,
                ..
            } => {
                hints.push(format!("Request timed out after {duration:?}"));
                match timeout_type {
                    TimeoutType::Request => {
                        hints.push("Consider increasing request timeout".to_string());
                        hints.push("Check network latency to the endpoint".to_string());
                    }
                    TimeoutType::Connection => {
                        hints.push("Check network connectivity".to_string());
                        hints.push("Verify the endpoint is reachable".to_string());
                    }
                    TimeoutType::Read => {
                        hints.push("The explorer is not responding".to_string());
                        hints.push("Try a different endpoint".to_string());
                    }
                }
            }
            _ => {}
        }

        hints
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ChartDataError>;

impl From<tokio::time::error::Elapsed> for ChartDataError {
    fn from(_elapsed: tokio::time::error::Elapsed) -> Self {
        Self::Timeout {
            duration: Duration::from_secs(30), // Default timeout
            operation: "chart request".to_string(),
            timeout_type: TimeoutType::Request,
        }
    }
}

impl From<reqwest::Error> for ChartDataError {
    fn from(error: reqwest::Error) -> Self {
        Self::Http {
            source: error,
            context: None,
        }
    }
}

impl From<serde_json::Error> for ChartDataError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json {
            source: error,
            data_sample: None,
        }
    }
}

impl ChartDataError {
    /// Helper for creating configuration errors with suggestions
    pub fn config_error(message: &str, field: Option<&str>, suggestion: Option<&str>) -> Self {
        Self::Config {
            message: message.to_string(),
            field: field.map(String::from),
            suggestion: suggestion.map(String::from),
        }
    }

    #[must_use]
    pub fn connection_failed(
        endpoint: &str,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::ConnectionFailed {
            endpoint: endpoint.to_string(),
            source,
            endpoint_reachable: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_error_ext_retryable() {
        let timeout_error = ChartDataError::Timeout {
            duration: Duration::from_secs(30),
            operation: "test".to_string(),
            timeout_type: TimeoutType::Request,
        };
        assert!(timeout_error.is_retryable());

        let config_error = ChartDataError::Config {
            message: "Invalid config".to_string(),
            field: Some("base_url".to_string()),
            suggestion: Some("Fix the base URL".to_string()),
        };
        assert!(!config_error.is_retryable());
    }

    #[test]
    fn test_error_ext_transient() {
        let rate_limit = ChartDataError::RateLimit {
            retry_after: Some(Duration::from_secs(30)),
        };
        assert!(rate_limit.is_transient());

        let json_error = ChartDataError::Json {
            source: serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err(),
            data_sample: None,
        };
        assert!(!json_error.is_transient());
    }

    #[test]
    fn test_error_ext_config_error() {
        let config_error = ChartDataError::Config {
            message: "Bad config".to_string(),
            field: None,
            suggestion: None,
        };
        assert!(config_error.is_config_error());

        let unknown_kind = ChartDataError::UnknownChartKind {
            value: "ticket-prices".to_string(),
        };
        assert!(unknown_kind.is_config_error());
        assert!(!unknown_kind.is_retryable());

        let timeout = ChartDataError::Timeout {
            timeout_type: TimeoutType::Request,
            duration: Duration::from_secs(30),
            operation: "test timeout".to_string(),
        };
        assert!(!timeout.is_config_error());
    }

    #[test]
    fn test_error_retry_delay() {
        let timeout_error = ChartDataError::Timeout {
            duration: Duration::from_secs(30),
            operation: "test".to_string(),
            timeout_type: TimeoutType::Request,
        };
        let delay = timeout_error.retry_delay();
        assert_eq!(delay, Some(Duration::from_secs(5)));

        let rate_limit = ChartDataError::RateLimit {
            retry_after: Some(Duration::from_secs(45)),
        };
        assert_eq!(rate_limit.retry_delay(), Some(Duration::from_secs(45)));

        let no_header = ChartDataError::RateLimit { retry_after: None };
        assert_eq!(no_header.retry_delay(), Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_error_category() {
        let config_error = ChartDataError::Config {
            message: "test".to_string(),
            field: None,
            suggestion: None,
        };
        assert_eq!(config_error.category(), ErrorCategory::Configuration);

        let timeout = ChartDataError::Timeout {
            timeout_type: TimeoutType::Request,
            duration: Duration::from_secs(30),
            operation: "test timeout".to_string(),
        };
        assert_eq!(timeout.category(), ErrorCategory::Network);

        let parsing = ChartDataError::ResponseParsing {
            reason: "not json".to_string(),
            response_sample: None,
            expected_structure: None,
        };
        assert_eq!(parsing.category(), ErrorCategory::Api);

        // RetryExhausted reports the category of the last error
        let exhausted = ChartDataError::RetryExhausted {
            attempts: 3,
            total_duration: Duration::from_secs(9),
            last_error: Box::new(ChartDataError::RateLimit { retry_after: None }),
            error_history: vec![],
        };
        assert_eq!(exhausted.category(), ErrorCategory::RateLimit);
    }

    #[test]
    fn test_error_debug_hints() {
        let config_error = ChartDataError::Config {
            message: "Invalid base URL".to_string(),
            field: Some("base_url".to_string()),
            suggestion: Some("Use a valid URL".to_string()),
        };
        let hints = config_error.debug_hints();
        assert!(!hints.is_empty());
        assert!(hints[0].contains("Use a valid URL"));

        let timeout_error = ChartDataError::Timeout {
            duration: Duration::from_secs(5),
            operation: "test".to_string(),
            timeout_type: TimeoutType::Read,
        };
        let hints = timeout_error.debug_hints();
        assert!(hints.iter().any(|h| h.contains("not responding")));
    }

    #[test]
    fn test_error_display() {
        let config_error = ChartDataError::Config {
            message: "Invalid base URL".to_string(),
            field: Some("base_url".to_string()),
            suggestion: Some("Use http:// or https://".to_string()),
        };
        let display = format!("{config_error}");
        assert!(display.contains("Configuration error"));
        assert!(display.contains("Invalid base URL"));

        let unknown = ChartDataError::UnknownChartKind {
            value: "bogus".to_string(),
        };
        assert!(format!("{unknown}").contains("bogus"));
    }

    #[test]
    fn test_from_conversions() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let chart_error: ChartDataError = json_error.into();
        assert!(matches!(chart_error, ChartDataError::Json { .. }));
    }

    #[test]
    fn test_constructor_methods() {
        let connection_failed = ChartDataError::connection_failed(
            "https://explorer.test",
            Box::new(std::io::Error::new(std::io::ErrorKind::TimedOut, "timeout")),
        );
        match connection_failed {
            ChartDataError::ConnectionFailed { endpoint, .. } => {
                assert_eq!(endpoint, "https://explorer.test");
            }
            _ => panic!("Expected ConnectionFailed error"),
        }
    }
}
