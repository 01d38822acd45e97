// src/monitor/mod.rs
mod aggregator;

pub use aggregator::HealthMonitor;
