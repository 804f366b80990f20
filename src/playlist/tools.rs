// Availability probe for the yt-dlp helper

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;

/// Checks that a helper executable answers `--version` in time.
pub struct ToolProbe {
    program: String,
    timeout: Duration,
}

impl ToolProbe {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// True iff `<program> --version` exits 0 within the timeout.
    ///
    /// Launch failures (not found, permission denied) count as unavailable.
    /// Output is discarded; a child that overruns is killed and reaped.
    pub async fn is_available(&self) -> bool {
        let spawned = Command::new(&self.program)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(e) => {
                tracing::debug!("[Probe] Failed to start {}: {}", self.program, e);
                return false;
            }
        };

        match timeout(self.timeout, child.wait()).await {
            Ok(Ok(status)) => {
                tracing::debug!("[Probe] {} --version exited with {}", self.program, status);
                status.success()
            }
            Ok(Err(e)) => {
                tracing::debug!("[Probe] Failed to wait for {}: {}", self.program, e);
                false
            }
            Err(_) => {
                tracing::warn!(
                    "[Probe] {} --version timed out after {}ms",
                    self.program,
                    self.timeout.as_millis()
                );
                let _ = child.kill().await;
                false
            }
        }
    }
}
