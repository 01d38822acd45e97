// src/status/store.rs
use super::snapshot::{iso8601, HealthSnapshot, ServiceReport};
use arc_swap::ArcSwap;
use std::sync::Arc;
use std::time::Instant;

/// The single shared record of last-known health. Written only by the
/// monitor, read on every HTTP request; `replace` is one pointer swap,
/// so readers never block on a write in flight.
pub struct StatusStore {
    current: ArcSwap<HealthSnapshot>,
    started_at: Instant,
}

impl StatusStore {
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(HealthSnapshot::initial()),
            started_at: Instant::now(),
        }
    }

    pub fn read(&self) -> Arc<HealthSnapshot> {
        self.current.load_full()
    }

    /// Whole-snapshot replacement; there is no partial update.
    pub fn replace(&self, snapshot: HealthSnapshot) {
        self.current.store(Arc::new(snapshot));
    }

    /// Seconds this process has been running, recomputed at every call.
    pub fn uptime_secs(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }

    /// Render the current snapshot in the wire shape, with uptime as of now.
    pub fn report(&self) -> ServiceReport {
        let snapshot = self.current.load();
        ServiceReport {
            mongodb: snapshot.mongodb,
            redis: snapshot.redis,
            overleaf: snapshot.overleaf,
            last_check: snapshot.last_check.map(iso8601),
            uptime: self.uptime_secs(),
        }
    }
}

impl Default for StatusStore {
    fn default() -> Self {
        Self::new()
    }
}
