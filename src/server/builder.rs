// src/server/builder.rs
use crate::server::listener::bind_tcp;
use anyhow::Result;
use hyper::{server::conn::Http, Body, Request, Response};
use std::net::SocketAddr;
use tower::Service;

/// Binds the listen socket and drives one Hyper task per connection.
/// Generic over the handler so tests can serve a fake.
pub struct ServerBuilder<H>
where
    H: Service<Request<Body>, Response = Response<Body>> + Send + Clone + 'static,
    H::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    H::Future: Send + 'static,
{
    addr: SocketAddr,
    handler: H,
}

impl<H> ServerBuilder<H>
where
    H: Service<Request<Body>, Response = Response<Body>> + Send + Clone + 'static,
    H::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    H::Future: Send + 'static,
{
    pub fn new(addr: SocketAddr, handler: H) -> Self {
        Self { addr, handler }
    }

    /// Accept loop; runs until the process exits.
    pub async fn serve(self) -> Result<()> {
        let listener = bind_tcp(self.addr).await?;
        tracing::info!("HTTP server listening on {}", self.addr);

        loop {
            let (stream, peer) = listener.accept().await?;
            let svc = self.handler.clone();

            tokio::spawn(async move {
                let http = Http::new();
                if let Err(err) = http.serve_connection(stream, svc).await {
                    tracing::warn!(%peer, %err, "connection error");
                }
            });
        }
    }
}
