// src/status/snapshot.rs
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Combined result of one monitoring cycle. Immutable once built; the
/// store swaps whole snapshots, so readers never observe fields from two
/// different cycles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthSnapshot {
    pub mongodb: bool,
    pub redis: bool,
    pub overleaf: bool,
    pub last_check: Option<DateTime<Utc>>,
}

impl HealthSnapshot {
    /// Placeholder until the first cycle completes: nothing is known to
    /// be reachable yet, and no check has happened.
    pub fn initial() -> Self {
        Self {
            mongodb: false,
            redis: false,
            overleaf: false,
            last_check: None,
        }
    }

    /// The orchestrator gate: MongoDB and Redis only. The application's
    /// own health is deliberately excluded from the pass/fail decision.
    pub fn gate_healthy(&self) -> bool {
        self.mongodb && self.redis
    }
}

/// Wire shape of the `services` object. Field names are an external
/// contract; `uptime` is filled in at render time, not frozen into the
/// snapshot.
#[derive(Debug, Serialize)]
pub struct ServiceReport {
    pub mongodb: bool,
    pub redis: bool,
    pub overleaf: bool,
    #[serde(rename = "lastCheck")]
    pub last_check: Option<String>,
    pub uptime: f64,
}

/// ISO-8601 with millisecond precision and a `Z` suffix, matching what
/// pollers of these endpoints already parse.
pub(crate) fn iso8601(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(mongodb: bool, redis: bool, overleaf: bool) -> HealthSnapshot {
        HealthSnapshot {
            mongodb,
            redis,
            overleaf,
            last_check: Some(Utc::now()),
        }
    }

    #[test]
    fn initial_snapshot_is_all_unhealthy() {
        let snap = HealthSnapshot::initial();
        assert!(!snap.mongodb && !snap.redis && !snap.overleaf);
        assert!(snap.last_check.is_none());
        assert!(!snap.gate_healthy());
    }

    #[test]
    fn gate_ignores_application_health() {
        assert!(snapshot(true, true, false).gate_healthy());
        assert!(snapshot(true, true, true).gate_healthy());
        assert!(!snapshot(false, true, true).gate_healthy());
        assert!(!snapshot(true, false, true).gate_healthy());
        assert!(!snapshot(false, false, false).gate_healthy());
    }

    #[test]
    fn iso8601_uses_zulu_suffix() {
        let t = DateTime::parse_from_rfc3339("2024-03-01T12:00:00.500+00:00")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(iso8601(t), "2024-03-01T12:00:00.500Z");
    }
}
