// src/status/memory.rs
use serde::Serialize;

/// Process memory stats for the operator detail view, in bytes. Read
/// from /proc on Linux; zeros elsewhere.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemoryUsage {
    pub rss: u64,
    #[serde(rename = "vmSize")]
    pub vm_size: u64,
}

impl MemoryUsage {
    pub fn capture() -> Self {
        #[cfg(target_os = "linux")]
        {
            if let Ok(status) = std::fs::read_to_string("/proc/self/status") {
                return Self::parse(&status);
            }
        }
        Self::default()
    }

    #[cfg_attr(not(target_os = "linux"), allow(dead_code))]
    fn parse(status: &str) -> Self {
        let mut usage = Self::default();
        for line in status.lines() {
            if let Some(rest) = line.strip_prefix("VmRSS:") {
                usage.rss = parse_kb(rest);
            } else if let Some(rest) = line.strip_prefix("VmSize:") {
                usage.vm_size = parse_kb(rest);
            }
        }
        usage
    }
}

// Lines look like "VmRSS:     1234 kB"
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_kb(value: &str) -> u64 {
    value
        .trim()
        .trim_end_matches("kB")
        .trim()
        .parse::<u64>()
        .map(|kb| kb * 1024)
        .unwrap_or(0)
}
