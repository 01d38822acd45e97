// src/probe/http.rs
use super::{Probe, ProbeResult};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Probes the application by hitting its status path; healthy only on an
/// exact `200`. Connection errors are expected while the application is
/// still starting, so they log at debug rather than warn.
pub struct HttpProbe {
    name: String,
    url: Url,
    client: Client,
}

impl HttpProbe {
    pub fn new(name: &str, url: Url, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            name: name.to_string(),
            url,
            client,
        }
    }
}

#[async_trait]
impl Probe for HttpProbe {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self) -> ProbeResult {
        let healthy = match self.client.get(self.url.as_str()).send().await {
            Ok(response) => {
                let status = response.status();
                if status != StatusCode::OK {
                    debug!(probe = %self.name, %status, "status probe returned non-200");
                }
                status == StatusCode::OK
            }
            Err(e) => {
                debug!(probe = %self.name, error = %e, "status probe request failed");
                false
            }
        };

        ProbeResult { healthy }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe_for(url: &str) -> HttpProbe {
        HttpProbe::new("overleaf", url.parse().unwrap(), Duration::from_secs(1))
    }

    #[tokio::test]
    async fn healthy_on_200() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/status")
            .with_status(200)
            .create_async()
            .await;

        let probe = probe_for(&format!("{}/status", server.url()));
        assert!(probe.check().await.healthy);
    }

    #[tokio::test]
    async fn unhealthy_on_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/status")
            .with_status(502)
            .create_async()
            .await;

        let probe = probe_for(&format!("{}/status", server.url()));
        assert!(!probe.check().await.healthy);
    }

    #[tokio::test]
    async fn unhealthy_on_non_200_success_status() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/status")
            .with_status(204)
            .create_async()
            .await;

        let probe = probe_for(&format!("{}/status", server.url()));
        assert!(!probe.check().await.healthy);
    }

    #[tokio::test]
    async fn unhealthy_when_connection_refused() {
        // Nothing listens on port 1
        let probe = probe_for("http://127.0.0.1:1/status");
        assert!(!probe.check().await.healthy);
    }
}
