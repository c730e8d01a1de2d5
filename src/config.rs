use governor::{Quota, RateLimiter};
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::time::Duration;

/// Rate limiter type alias for easier use
type ApiRateLimiter = RateLimiter<
    governor::state::direct::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// Configuration for the `ChartDataClient`
#[derive(Debug)]
pub struct ClientConfig {
    /// Explorer base URL; chart paths are appended to it
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Number of retry attempts
    pub retry_attempts: u32,
    /// Client-side rate limiter (requests per second)
    pub rate_limiter: Option<ApiRateLimiter>,
    /// Maximum in-flight requests for batch fetches
    pub max_concurrent_requests: usize,
    /// Custom HTTP headers
    pub headers: HashMap<String, String>,
}

impl Clone for ClientConfig {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            timeout: self.timeout,
            retry_attempts: self.retry_attempts,
            rate_limiter: None, // Cannot clone rate limiter due to internal state
            max_concurrent_requests: self.max_concurrent_requests,
            headers: self.headers.clone(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:7777".to_string(),
            timeout: Duration::from_secs(30),
            retry_attempts: 3,
            rate_limiter: None,
            max_concurrent_requests: 4,
            headers: HashMap::new(),
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Configuration for public explorer deployments: generous timeout,
    /// more retries, conservative rate limiting
    #[must_use]
    pub fn public_explorer_config() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
            .timeout(Duration::from_secs(60))
            .retry_attempts(5)
            .rate_limit(2)
            .max_concurrent_requests(2)
    }

    /// Configuration for an explorer running on the local machine
    #[must_use]
    pub fn local_node_config() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
            .timeout(Duration::from_secs(10))
            .retry_attempts(2)
            .max_concurrent_requests(8)
    }

    /// Pick a preset based on the endpoint host
    #[must_use]
    pub fn auto_config(base_url: &str) -> ClientConfigBuilder {
        let builder = if base_url.contains("127.0.0.1") || base_url.contains("localhost") {
            Self::local_node_config()
        } else {
            Self::public_explorer_config()
        };

        builder.base_url(base_url.to_string())
    }
}

/// Builder for `ClientConfig`
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    #[must_use]
    pub fn base_url(mut self, base_url: String) -> Self {
        self.config.base_url = base_url;
        self
    }

    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    #[must_use]
    pub const fn retry_attempts(mut self, attempts: u32) -> Self {
        self.config.retry_attempts = attempts;
        self
    }

    /// Limit outgoing requests per second; zero disables the limiter
    #[must_use]
    pub fn rate_limit(mut self, requests_per_second: u32) -> Self {
        if let Some(non_zero) = NonZeroU32::new(requests_per_second) {
            let quota = Quota::per_second(non_zero);
            self.config.rate_limiter = Some(RateLimiter::direct(quota));
        }
        self
    }

    #[must_use]
    pub const fn max_concurrent_requests(mut self, max: usize) -> Self {
        self.config.max_concurrent_requests = max;
        self
    }

    #[must_use]
    pub fn add_header(mut self, key: String, value: String) -> Self {
        self.config.headers.insert(key, value);
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}

impl Default for ClientConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
