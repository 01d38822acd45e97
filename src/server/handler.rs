// src/server/handler.rs
use chrono::Utc;
use hyper::{header, Body, Method, Request, Response, StatusCode};
use serde_json::json;
use std::sync::Arc;
use tower::Service;

use crate::status::{iso8601, MemoryUsage, StatusStore};

/// Routes the three reporting endpoints. Every response is JSON and
/// reflects whatever snapshot the store holds right now; handlers never
/// trigger a probe themselves.
#[derive(Clone)]
pub struct RequestHandler {
    store: Arc<StatusStore>,
}

impl RequestHandler {
    pub fn new(store: Arc<StatusStore>) -> Self {
        Self { store }
    }

    pub fn route(&self, req: &Request<Body>) -> Response<Body> {
        match (req.method(), req.uri().path()) {
            (&Method::GET, "/health") => self.health(),
            (&Method::GET, "/status") => self.status(),
            (&Method::GET, "/ping") => self.ping(),
            _ => json_response(
                StatusCode::NOT_FOUND,
                json!({
                    "error": "not found",
                    "timestamp": now(),
                }),
            ),
        }
    }

    /// Orchestrator gate: 200 only when MongoDB and Redis are both up.
    fn health(&self) -> Response<Body> {
        let snapshot = self.store.read();
        let (code, label) = if snapshot.gate_healthy() {
            (StatusCode::OK, "healthy")
        } else {
            (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
        };

        json_response(
            code,
            json!({
                "status": label,
                "services": self.store.report(),
                "timestamp": now(),
            }),
        )
    }

    /// Operator detail view; always 200 so introspection survives a
    /// degraded backend.
    fn status(&self) -> Response<Body> {
        json_response(
            StatusCode::OK,
            json!({
                "status": "running",
                "services": self.store.report(),
                "uptime": self.store.uptime_secs(),
                "memory": MemoryUsage::capture(),
                "timestamp": now(),
            }),
        )
    }

    fn ping(&self) -> Response<Body> {
        json_response(
            StatusCode::OK,
            json!({
                "message": "pong",
                "timestamp": now(),
            }),
        )
    }
}

impl Service<Request<Body>> for RequestHandler {
    type Response = Response<Body>;
    type Error = Box<dyn std::error::Error + Send + Sync>;
    type Future = futures::future::BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &mut self,
        _cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        std::task::Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let handler = self.clone();
        Box::pin(async move { Ok(handler.route(&req)) })
    }
}

// Request handling time, distinct from the snapshot's lastCheck.
fn now() -> String {
    iso8601(Utc::now())
}

fn json_response(code: StatusCode, body: serde_json::Value) -> Response<Body> {
    Response::builder()
        .status(code)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
