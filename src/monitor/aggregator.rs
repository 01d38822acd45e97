// src/monitor/aggregator.rs
use crate::probe::{Probe, ProbeResult};
use crate::status::{HealthSnapshot, StatusStore};
use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{debug, error, info};

/// Drives the periodic health cycle: fan out to every probe, wait for
/// all of them to settle, publish one snapshot to the store.
pub struct HealthMonitor {
    mongo: Arc<dyn Probe>,
    redis: Arc<dyn Probe>,
    overleaf: Arc<dyn Probe>,
    store: Arc<StatusStore>,
    period: Duration,
    shutdown_tx: tokio::sync::watch::Sender<bool>,
    shutdown_rx: tokio::sync::watch::Receiver<bool>,
}

impl HealthMonitor {
    pub fn new(
        mongo: Arc<dyn Probe>,
        redis: Arc<dyn Probe>,
        overleaf: Arc<dyn Probe>,
        store: Arc<StatusStore>,
        period: Duration,
    ) -> Self {
        let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

        Self {
            mongo,
            redis,
            overleaf,
            store,
            period,
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// Ticks once immediately, then every period. Cycles are spawned
    /// rather than awaited: a cycle that outlives the period runs
    /// alongside the next one, and the last cycle to finish wins the
    /// store.
    pub async fn start(self: Arc<Self>) {
        let mut interval = interval(self.period);
        let mut shutdown_rx = self.shutdown_rx.clone();

        info!("Starting health monitor with interval: {:?}", self.period);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let monitor = self.clone();
                    tokio::spawn(async move { monitor.run_cycle().await });
                }
                _ = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        info!("Health monitor shutting down");
                        break;
                    }
                }
            }
        }
    }

    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    /// One full check-and-publish cycle. If the snapshot cannot be
    /// assembled, the previous one stays live; a skipped publish beats a
    /// torn one.
    pub async fn run_cycle(&self) {
        match self.collect().await {
            Ok(snapshot) => {
                info!(
                    "Health check: MongoDB({}), Redis({}), Overleaf({})",
                    snapshot.mongodb, snapshot.redis, snapshot.overleaf
                );
                self.store.replace(snapshot);
            }
            Err(e) => {
                error!("Health check cycle failed: {}", e);
            }
        }
    }

    async fn collect(&self) -> Result<HealthSnapshot> {
        let mongo = spawn_check(self.mongo.clone());
        let redis = spawn_check(self.redis.clone());
        let overleaf = spawn_check(self.overleaf.clone());

        // A probe never errors; a failed join means a panic in our own
        // machinery, which skips this cycle's publish.
        let (mongo, redis, overleaf) = tokio::try_join!(mongo, redis, overleaf)?;

        Ok(HealthSnapshot {
            mongodb: mongo.healthy,
            redis: redis.healthy,
            overleaf: overleaf.healthy,
            last_check: Some(Utc::now()),
        })
    }
}

fn spawn_check(probe: Arc<dyn Probe>) -> JoinHandle<ProbeResult> {
    tokio::spawn(async move {
        let result = probe.check().await;
        debug!(probe = %probe.name(), healthy = result.healthy, "probe settled");
        result
    })
}
