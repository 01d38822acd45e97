// src/status/mod.rs
mod memory;
mod snapshot;
mod store;

pub use memory::MemoryUsage;
pub(crate) use snapshot::iso8601;
pub use snapshot::{HealthSnapshot, ServiceReport};
pub use store::StatusStore;
