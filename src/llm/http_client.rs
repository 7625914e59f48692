use reqwest::Client;
use std::time::Duration;

/// Transport timeout used when config does not say otherwise.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared HTTP client settings for generative-service calls.
///
/// A builder failure (TLS backend init) falls back to reqwest defaults so
/// the provider still constructs; requests then surface the real error.
pub fn provider_client(request_timeout: Duration) -> Client {
    Client::builder()
        .timeout(request_timeout)
        .connect_timeout(CONNECT_TIMEOUT.min(request_timeout))
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
        .unwrap_or_else(|err| {
            tracing::warn!(error = %err, "falling back to default HTTP client");
            Client::new()
        })
}
