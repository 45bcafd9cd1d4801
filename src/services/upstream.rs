//! HTTP client for the forecast and dose estimation providers.
//!
//! Wraps a pooled `reqwest::Client` with structured logging and Prometheus
//! metrics. Each call is made exactly once: no retries, no timeouts beyond
//! the transport's own.

use crate::config::UpstreamConfig;
use prometheus::{CounterVec, HistogramOpts, HistogramVec, Opts, Registry};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use std::time::Instant;
use tracing::{error, info, warn};

/// Metrics for outbound provider calls
#[derive(Clone)]
pub struct UpstreamMetrics {
    /// Requests by destination, method, and outcome
    pub http_requests_total: CounterVec,

    /// Request duration by destination and method
    pub http_request_duration_seconds: HistogramVec,
}

impl UpstreamMetrics {
    /// Create the collectors and register them with `registry`
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let http_requests_total = CounterVec::new(
            Opts::new(
                "upstream_http_requests_total",
                "Total upstream HTTP requests by destination, method, and outcome",
            ),
            &["destination", "method", "outcome"],
        )?;

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "upstream_http_request_duration_seconds",
                "Duration of upstream HTTP requests",
            )
            .buckets(vec![0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
            &["destination", "method"],
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;

        Ok(Self {
            http_requests_total,
            http_request_duration_seconds,
        })
    }
}

/// Request context for logging and metrics
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub destination: String,
    pub method: &'static str,
    pub url: String,
}

impl RequestContext {
    fn new(method: &'static str, url: &str) -> Self {
        Self {
            destination: extract_destination(url),
            method,
            url: url.to_string(),
        }
    }
}

/// Errors from a single upstream call
#[derive(Debug, thiserror::Error)]
pub enum UpstreamCallError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(u16),
}

/// Shared client used by both provider integrations
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client,
    metrics: Option<UpstreamMetrics>,
    enable_detailed_logging: bool,
}

impl UpstreamClient {
    pub fn new(
        config: &UpstreamConfig,
        metrics: Option<UpstreamMetrics>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            metrics,
            enable_detailed_logging: config.enable_detailed_logging,
        })
    }

    /// GET `url` with `query` appended, returning the body text
    pub async fn get_text<Q: Serialize + ?Sized>(
        &self,
        url: &str,
        query: &Q,
    ) -> Result<String, UpstreamCallError> {
        let context = RequestContext::new("GET", url);
        let request = self.client.get(url).query(query);
        self.execute(request, context).await
    }

    /// POST `form` urlencoded to `url`, returning the body text
    pub async fn post_form<F: Serialize + ?Sized>(
        &self,
        url: &str,
        form: &F,
    ) -> Result<String, UpstreamCallError> {
        let context = RequestContext::new("POST", url);
        let request = self.client.post(url).form(form);
        self.execute(request, context).await
    }

    async fn execute(
        &self,
        request: RequestBuilder,
        context: RequestContext,
    ) -> Result<String, UpstreamCallError> {
        let start = Instant::now();
        let result = Self::send(request).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(body) => {
                if self.enable_detailed_logging {
                    info!(
                        destination = %context.destination,
                        method = context.method,
                        url = %context.url,
                        body_bytes = body.len(),
                        duration_ms = elapsed.as_millis(),
                        "Upstream request completed"
                    );
                }
                self.record(&context, "success", elapsed.as_secs_f64());
            }
            Err(UpstreamCallError::Status(status)) => {
                warn!(
                    destination = %context.destination,
                    method = context.method,
                    url = %context.url,
                    status = *status,
                    duration_ms = elapsed.as_millis(),
                    "Upstream request returned error status"
                );
                self.record(&context, "http_status", elapsed.as_secs_f64());
            }
            Err(UpstreamCallError::Network(e)) => {
                error!(
                    destination = %context.destination,
                    method = context.method,
                    url = %context.url,
                    error = %e,
                    duration_ms = elapsed.as_millis(),
                    "Upstream request failed with network error"
                );
                self.record(&context, "network_error", elapsed.as_secs_f64());
            }
        }

        result
    }

    async fn send(request: RequestBuilder) -> Result<String, UpstreamCallError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamCallError::Status(status.as_u16()));
        }
        Ok(response.text().await?)
    }

    fn record(&self, context: &RequestContext, outcome: &str, seconds: f64) {
        if let Some(metrics) = &self.metrics {
            metrics
                .http_requests_total
                .with_label_values(&[context.destination.as_str(), context.method, outcome])
                .inc();

            metrics
                .http_request_duration_seconds
                .with_label_values(&[context.destination.as_str(), context.method])
                .observe(seconds);
        }
    }
}

/// Host of `url`, used to group metrics and log lines
fn extract_destination(url: &str) -> String {
    url::Url::parse(url)
        .map(|u| u.host_str().unwrap_or("unknown").to_string())
        .unwrap_or_else(|_| "invalid_url".to_string())
}
