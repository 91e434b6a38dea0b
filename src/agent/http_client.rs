use reqwest::Client;
use std::time::Duration;

/// HTTP client for agent calls. The request deadline itself is enforced by
/// the orchestrator; this timeout only backs it up.
pub fn build_agent_client(timeout_secs: u64) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs.saturating_add(5)))
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .build()
        .unwrap_or_else(|_| Client::new())
}
