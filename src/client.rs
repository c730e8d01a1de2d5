use crate::{
    config::ClientConfig,
    error::{ChartDataError, Result, TimeoutType},
    types::{ChartKind, MetricsPayload},
};
use futures::stream::{self, StreamExt};
use reqwest::Client;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tokio_retry::strategy::{jitter, ExponentialBackoff};
use tracing::{debug, error, info, instrument, trace, warn};

/// Client for fetching precomputed chart series from an explorer endpoint
///
/// One instance serves every chart kind; requests go to
/// `GET {base_url}/api/chart/{kind}` with the configured timeout, retry,
/// and rate-limit discipline.
#[derive(Debug)]
pub struct ChartDataClient {
    config: ClientConfig,
    http_client: Client,
}

impl ChartDataClient {
    /// Create a new client with default configuration
    #[instrument(fields(endpoint = base_url))]
    pub fn new(base_url: &str) -> Result<Self> {
        info!(endpoint = base_url, "Creating new ChartDataClient");

        if base_url.is_empty() {
            return Err(ChartDataError::config_error(
                "Base URL cannot be empty",
                Some("base_url"),
                Some("Provide the explorer's base URL"),
            ));
        }

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ChartDataError::config_error(
                "Base URL must start with http:// or https://",
                Some("base_url"),
                Some("Use a complete URL like http://127.0.0.1:7777"),
            ));
        }

        let config = ClientConfig::builder()
            .base_url(base_url.to_string())
            .build();

        Self::from_config(config)
    }

    /// Create a client from configuration
    #[instrument(skip(config), fields(endpoint = %config.base_url))]
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        debug!(
            endpoint = %config.base_url,
            timeout_ms = config.timeout.as_millis(),
            retry_attempts = config.retry_attempts,
            "Creating client from configuration"
        );

        let mut headers = reqwest::header::HeaderMap::new();

        for (key, value) in &config.headers {
            trace!(header_name = key, "Adding custom header");

            let header_name = reqwest::header::HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| {
                    ChartDataError::config_error(
                        &format!("Invalid header name '{key}': {e}"),
                        Some("headers"),
                        Some("Use valid HTTP header names (alphanumeric and hyphens)"),
                    )
                })?;

            let header_value = reqwest::header::HeaderValue::from_str(value).map_err(|e| {
                ChartDataError::config_error(
                    &format!("Invalid header value '{value}': {e}"),
                    Some("headers"),
                    Some("Header values must be valid ASCII"),
                )
            })?;

            headers.insert(header_name, header_value);
        }

        let http_client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .user_agent("chain-charts-lib/0.1.0")
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(4)
            .build()
            .map_err(|e| {
                ChartDataError::config_error(
                    &format!("Failed to create HTTP client: {e}"),
                    None,
                    Some("Check timeout and header configuration"),
                )
            })?;

        info!(endpoint = %config.base_url, "Successfully created ChartDataClient");

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Create a client builder for custom configuration
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// The configured endpoint base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Fetch the metrics payload for one chart kind
    ///
    /// Returns `NoData` when the endpoint answers with a payload that has
    /// no samples at all.
    pub async fn fetch_chart(&self, kind: ChartKind) -> Result<MetricsPayload> {
        let payload = self.get_payload(kind).await?;

        if payload.is_empty() {
            return Err(ChartDataError::NoData {
                kind,
                reason: Some("endpoint returned a payload with no samples".to_string()),
            });
        }

        Ok(payload)
    }

    /// Fetch several chart kinds, bounded by `max_concurrent_requests`
    ///
    /// Results come back paired with their kind, in request order, one
    /// `Result` per kind so a single failing chart does not sink the batch.
    pub async fn fetch_charts(
        &self,
        kinds: &[ChartKind],
    ) -> Vec<(ChartKind, Result<MetricsPayload>)> {
        stream::iter(kinds.iter().copied())
            .map(|kind| async move { (kind, self.fetch_chart(kind).await) })
            .buffered(self.config.max_concurrent_requests.max(1))
            .collect()
            .await
    }

    #[instrument(skip(self), fields(endpoint = %self.config.base_url, chart = %kind))]
    async fn get_payload(&self, kind: ChartKind) -> Result<MetricsPayload> {
        let url = format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            kind.api_path()
        );

        info!(url = %url, "Starting chart request");

        // Apply rate limiting if configured
        if let Some(rate_limiter) = &self.config.rate_limiter {
            let start_wait = Instant::now();
            rate_limiter.until_ready().await;
            let wait_duration = start_wait.elapsed();

            if wait_duration > Duration::from_millis(10) {
                debug!(
                    wait_duration_ms = wait_duration.as_millis(),
                    "Rate limiter delayed request"
                );
            }
        }

        let mut error_history = Vec::new();
        let total_start = Instant::now();
        let max_attempts = self.config.retry_attempts.max(1);
        let mut backoff = ExponentialBackoff::from_millis(100)
            .max_delay(Duration::from_secs(2))
            .map(jitter);

        for attempt in 1..=max_attempts {
            let attempt_start = Instant::now();

            debug!(
                attempt = attempt,
                max_attempts = max_attempts,
                timeout_ms = self.config.timeout.as_millis(),
                "Attempting chart request"
            );

            let http_result =
                timeout(self.config.timeout, self.http_client.get(&url).send()).await;

            let response = match http_result {
                Ok(Ok(response)) => {
                    debug!(
                        status = response.status().as_u16(),
                        attempt_duration_ms = attempt_start.elapsed().as_millis(),
                        "HTTP request completed"
                    );
                    response
                }
                Ok(Err(e)) => {
                    error_history.push(format!("HTTP error on attempt {attempt}: {e}"));

                    warn!(
                        attempt = attempt,
                        error = %e,
                        attempt_duration_ms = attempt_start.elapsed().as_millis(),
                        "HTTP request failed"
                    );

                    if e.is_timeout() {
                        if attempt == max_attempts {
                            return Err(ChartDataError::Timeout {
                                duration: self.config.timeout,
                                operation: format!("chart {kind} request"),
                                timeout_type: TimeoutType::Request,
                            });
                        }
                        Self::backoff_sleep(&mut backoff, attempt).await;
                        continue;
                    } else if e.is_connect() {
                        if attempt == max_attempts {
                            return Err(ChartDataError::ConnectionFailed {
                                endpoint: self.config.base_url.clone(),
                                source: Box::new(e),
                                endpoint_reachable: None,
                            });
                        }
                        Self::backoff_sleep(&mut backoff, attempt).await;
                        continue;
                    }
                    return Err(ChartDataError::Http {
                        source: e,
                        context: Some(format!("chart {kind} request attempt {attempt}")),
                    });
                }
                Err(_) => {
                    error_history.push(format!(
                        "Request timeout on attempt {} after {:?}",
                        attempt, self.config.timeout
                    ));

                    warn!(
                        attempt = attempt,
                        timeout_ms = self.config.timeout.as_millis(),
                        "Request timed out"
                    );

                    if attempt == max_attempts {
                        return Err(ChartDataError::Timeout {
                            duration: self.config.timeout,
                            operation: format!("chart {kind} request"),
                            timeout_type: TimeoutType::Request,
                        });
                    }
                    Self::backoff_sleep(&mut backoff, attempt).await;
                    continue;
                }
            };

            let status = response.status();
            if !status.is_success() {
                error_history.push(format!("HTTP {} error on attempt {}", status.as_u16(), attempt));

                warn!(
                    attempt = attempt,
                    status = status.as_u16(),
                    "HTTP request returned error status"
                );

                match status.as_u16() {
                    429 => {
                        let retry_after = response
                            .headers()
                            .get("retry-after")
                            .and_then(|v| v.to_str().ok())
                            .and_then(|s| s.parse::<u64>().ok())
                            .map(Duration::from_secs);

                        debug!(
                            retry_after_secs = retry_after.as_ref().map(Duration::as_secs),
                            "Rate limit exceeded, will retry"
                        );

                        if attempt == max_attempts {
                            return Err(ChartDataError::RateLimit { retry_after });
                        }

                        if let Some(delay) = retry_after {
                            tokio::time::sleep(delay).await;
                        } else {
                            Self::backoff_sleep(&mut backoff, attempt).await;
                        }
                        continue;
                    }
                    500..=599 => {
                        // Server errors are retryable
                        if attempt == max_attempts {
                            return Err(ChartDataError::Http {
                                source: response.error_for_status().unwrap_err(),
                                context: Some(format!("Server error on attempt {attempt}")),
                            });
                        }
                        Self::backoff_sleep(&mut backoff, attempt).await;
                        continue;
                    }
                    _ => {
                        return Err(ChartDataError::Http {
                            source: response.error_for_status().unwrap_err(),
                            context: Some(format!(
                                "HTTP error {} on attempt {}",
                                status.as_u16(),
                                attempt
                            )),
                        });
                    }
                }
            }

            // Decode the metrics payload
            match response.json::<MetricsPayload>().await {
                Ok(payload) => {
                    info!(
                        chart = %kind,
                        attempt = attempt,
                        total_duration_ms = total_start.elapsed().as_millis(),
                        "Chart request completed successfully"
                    );
                    return Ok(payload);
                }
                Err(e) => {
                    error!(
                        attempt = attempt,
                        error = %e,
                        "Failed to decode chart payload"
                    );

                    return Err(ChartDataError::ResponseParsing {
                        reason: format!("Invalid chart payload: {e}"),
                        response_sample: None,
                        expected_structure: Some(
                            "JSON object of parallel metric arrays (time, valuef, ...)".to_string(),
                        ),
                    });
                }
            }
        }

        // All attempts consumed without returning
        error!(
            chart = %kind,
            total_attempts = max_attempts,
            total_duration_ms = total_start.elapsed().as_millis(),
            "All retry attempts exhausted"
        );

        Err(ChartDataError::RetryExhausted {
            attempts: max_attempts,
            total_duration: total_start.elapsed(),
            last_error: Box::new(ChartDataError::Timeout {
                duration: self.config.timeout,
                operation: format!("chart {kind} request"),
                timeout_type: TimeoutType::Request,
            }),
            error_history,
        })
    }

    async fn backoff_sleep(backoff: &mut impl Iterator<Item = Duration>, attempt: u32) {
        let delay = backoff
            .next()
            .unwrap_or_else(|| Duration::from_millis(100 * u64::from(attempt)));
        trace!(delay_ms = delay.as_millis(), "Backing off before retry");
        tokio::time::sleep(delay).await;
    }
}

/// Builder for `ChartDataClient`
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    #[must_use]
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.config.base_url = base_url.to_string();
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

    #[must_use]
    pub fn rate_limit(mut self, requests_per_second: u32) -> Self {
        use governor::{Quota, RateLimiter};
        use std::num::NonZeroU32;

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
    pub fn add_header(mut self, key: &str, value: &str) -> Self {
        self.config
            .headers
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Use preset configuration for public explorer deployments
    #[must_use]
    pub fn public_explorer_config(mut self) -> Self {
        self.config = ClientConfig::public_explorer_config().build();
        self
    }

    /// Use preset configuration for a local explorer
    #[must_use]
    pub fn local_node_config(mut self) -> Self {
        self.config = ClientConfig::local_node_config().build();
        self
    }

    /// Pick a preset based on the endpoint host
    #[must_use]
    pub fn auto_config(mut self, base_url: &str) -> Self {
        self.config = ClientConfig::auto_config(base_url).build();
        self
    }

    pub fn build(self) -> Result<ChartDataClient> {
        ChartDataClient::from_config(self.config)
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
