// src/probe/command.rs
use super::{Probe, ProbeResult};
use async_trait::async_trait;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::warn;

/// Probes a dependency by running a shell command and comparing its
/// trimmed stdout against an expected literal (`"1"` for the MongoDB
/// ping, `"PONG"` for Redis).
pub struct CommandProbe {
    name: String,
    command: String,
    expected: String,
    timeout: Duration,
}

impl CommandProbe {
    pub fn new(name: &str, command: &str, expected: &str, timeout: Duration) -> Self {
        Self {
            name: name.to_string(),
            command: command.to_string(),
            expected: expected.to_string(),
            timeout,
        }
    }
}

#[async_trait]
impl Probe for CommandProbe {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self) -> ProbeResult {
        let result = timeout(
            self.timeout,
            Command::new("sh").arg("-c").arg(&self.command).output(),
        )
        .await;

        let healthy = match result {
            Ok(Ok(output)) => {
                if output.status.success() {
                    let stdout = String::from_utf8_lossy(&output.stdout);
                    let matched = stdout.trim() == self.expected;
                    if !matched {
                        warn!(
                            probe = %self.name,
                            output = %stdout.trim(),
                            "unexpected check output"
                        );
                    }
                    matched
                } else {
                    warn!(
                        probe = %self.name,
                        code = ?output.status.code(),
                        "check command exited with failure"
                    );
                    false
                }
            }
            Ok(Err(e)) => {
                warn!(probe = %self.name, error = %e, "failed to run check command");
                false
            }
            Err(_) => {
                warn!(probe = %self.name, "check command timed out");
                false
            }
        };

        ProbeResult { healthy }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn healthy_when_output_matches() {
        let probe = CommandProbe::new("redis", "echo PONG", "PONG", Duration::from_secs(2));
        assert!(probe.check().await.healthy);
    }

    #[tokio::test]
    async fn output_is_trimmed_before_comparison() {
        let probe = CommandProbe::new("mongodb", "printf ' 1\\n'", "1", Duration::from_secs(2));
        assert!(probe.check().await.healthy);
    }

    #[tokio::test]
    async fn unhealthy_on_wrong_output() {
        let probe = CommandProbe::new("redis", "echo NOPE", "PONG", Duration::from_secs(2));
        assert!(!probe.check().await.healthy);
    }

    #[tokio::test]
    async fn unhealthy_on_nonzero_exit() {
        let probe = CommandProbe::new("mongodb", "exit 1", "1", Duration::from_secs(2));
        assert!(!probe.check().await.healthy);
    }

    #[tokio::test]
    async fn unhealthy_on_timeout() {
        let probe = CommandProbe::new("mongodb", "sleep 5", "1", Duration::from_millis(50));
        assert!(!probe.check().await.healthy);
    }
}
