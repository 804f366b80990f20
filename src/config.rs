// Runtime configuration for the exporter

use std::time::Duration;

/// Helper executable used when `YTDLP_PATH` is not set
pub const DEFAULT_HELPER: &str = "yt-dlp";

/// Output file used when no path is given on the command line
pub const DEFAULT_OUTPUT: &str = "playlist_videos.csv";

/// How long `--version` may take before the helper counts as unavailable
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq)]
pub struct ExporterConfig {
    /// Helper executable name or path
    pub helper: String,
    /// Availability probe timeout
    pub probe_timeout: Duration,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            helper: DEFAULT_HELPER.to_string(),
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}

impl ExporterConfig {
    /// Defaults overridden by the process environment.
    ///
    /// `YTDLP_PATH` points at a specific helper binary (e.g. a venv install);
    /// `PLAYLIST_EXPORT_PROBE_TIMEOUT_MS` changes the probe timeout.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(helper) = lookup("YTDLP_PATH").filter(|v| !v.trim().is_empty()) {
            config = config.with_helper(helper.trim());
        }

        if let Some(raw) = lookup("PLAYLIST_EXPORT_PROBE_TIMEOUT_MS") {
            match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => config = config.with_probe_timeout(Duration::from_millis(ms)),
                _ => tracing::warn!(
                    "Ignoring PLAYLIST_EXPORT_PROBE_TIMEOUT_MS={:?}; using {}ms",
                    raw,
                    config.probe_timeout.as_millis()
                ),
            }
        }

        config
    }

    pub fn with_helper(mut self, helper: impl Into<String>) -> Self {
        self.helper = helper.into();
        self
    }

    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }
}
