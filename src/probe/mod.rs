// src/probe/mod.rs
mod command;
mod http;

pub use command::CommandProbe;
pub use http::HttpProbe;

use async_trait::async_trait;

/// Outcome of a single check. Failures of any kind are folded into
/// `healthy = false` inside the probe; callers never see an error value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeResult {
    pub healthy: bool,
}

/// One bounded reachability check against one dependency.
#[async_trait]
pub trait Probe: Send + Sync {
    fn name(&self) -> &str;

    async fn check(&self) -> ProbeResult;
}
