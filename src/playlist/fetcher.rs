// Metadata fetcher: runs `yt-dlp --dump-json --flat-playlist` and collects entries

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, BufReader};
use tokio::process::{Child, ChildStdout, Command};
use tokio::task::JoinHandle;

use super::diagnostics::{diagnose_error, last_error_line};
use super::errors::ExportError;
use super::models::VideoEntry;
use super::parser::parse_entry;
use super::traits::{LineSource, ReaderLines};

/// Entries parsed from one playlist dump
#[derive(Debug, Default)]
pub struct FetchReport {
    /// In the order the helper printed them
    pub entries: Vec<VideoEntry>,
    /// Non-blank lines that were not JSON objects
    pub skipped: usize,
}

/// Parse every non-blank line of `source` into an entry.
///
/// Bad lines are logged and counted, never fatal. Only a read failure on
/// the source itself aborts collection.
pub async fn collect_entries(source: &mut dyn LineSource) -> Result<FetchReport, ExportError> {
    let mut report = FetchReport::default();
    let mut line_no = 0usize;

    while let Some(line) = source
        .next_line()
        .await
        .map_err(|e| ExportError::Io(e.to_string()))?
    {
        line_no += 1;
        if line.trim().is_empty() {
            continue;
        }

        match parse_entry(&line) {
            Ok(entry) => report.entries.push(entry),
            Err(e) => {
                report.skipped += 1;
                tracing::warn!(
                    "[Fetcher] Skipping line {} from {}: {}",
                    line_no,
                    source.name(),
                    e
                );
            }
        }
    }

    Ok(report)
}

/// A running helper with piped output.
///
/// Stdout is read on demand through `LineSource`; stderr is drained in the
/// background so a chatty helper never blocks on a full pipe. Every path
/// out of a fetch goes through `finish` or `abort`, which reap the child.
pub struct HelperProcess {
    program: String,
    child: Child,
    stdout: ReaderLines<BufReader<ChildStdout>>,
    stderr_task: JoinHandle<std::io::Result<Vec<u8>>>,
}

impl HelperProcess {
    pub fn spawn(program: &str, args: &[String]) -> Result<Self, ExportError> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ExportError::Spawn(format!("{}: {}", program, e)))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ExportError::Spawn(format!("Failed to capture stdout from {}", program)))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| ExportError::Spawn(format!("Failed to capture stderr from {}", program)))?;

        let stderr_task = tokio::spawn(async move {
            let mut buf = Vec::new();
            stderr.read_to_end(&mut buf).await?;
            Ok(buf)
        });

        Ok(Self {
            program: program.to_string(),
            child,
            stdout: ReaderLines::new(BufReader::new(stdout)),
            stderr_task,
        })
    }

    /// Wait for exit once stdout is exhausted. Non-zero status becomes
    /// `HelperFailed` carrying the full stderr text.
    pub async fn finish(mut self) -> Result<(), ExportError> {
        let status = self
            .child
            .wait()
            .await
            .map_err(|e| ExportError::Io(format!("Failed to wait for {}: {}", self.program, e)))?;

        let stderr = match self.stderr_task.await {
            Ok(Ok(buf)) => String::from_utf8_lossy(&buf).into_owned(),
            Ok(Err(e)) => {
                tracing::warn!("[Fetcher] Failed to read stderr of {}: {}", self.program, e);
                String::new()
            }
            Err(e) => {
                tracing::warn!("[Fetcher] stderr reader for {} failed: {}", self.program, e);
                String::new()
            }
        };

        if status.success() {
            if !stderr.trim().is_empty() {
                tracing::debug!("[Fetcher] {} stderr: {}", self.program, stderr.trim_end());
            }
            return Ok(());
        }

        Err(ExportError::HelperFailed {
            status: status.code(),
            stderr,
        })
    }

    /// Kill and reap the helper after a failed read.
    pub async fn abort(mut self) {
        if let Err(e) = self.child.kill().await {
            tracing::debug!("[Fetcher] Failed to kill {}: {}", self.program, e);
        }
        self.stderr_task.abort();
    }
}

#[async_trait]
impl LineSource for HelperProcess {
    fn name(&self) -> &'static str {
        "yt-dlp"
    }

    async fn next_line(&mut self) -> std::io::Result<Option<String>> {
        self.stdout.next_line().await
    }
}

/// Fetches flat playlist metadata through the helper executable
pub struct PlaylistFetcher {
    helper: String,
}

impl PlaylistFetcher {
    pub fn new(helper: impl Into<String>) -> Self {
        Self {
            helper: helper.into(),
        }
    }

    /// Arguments for a flat JSON-per-line dump. The locator is passed as a
    /// single argv entry after `--`, so a leading `-` is never read as an option.
    pub fn build_args(locator: &str) -> Vec<String> {
        vec![
            "--dump-json".to_string(),
            "--flat-playlist".to_string(),
            "--".to_string(),
            locator.to_string(),
        ]
    }

    /// Dump the playlist and parse it line by line as the helper runs.
    ///
    /// A non-zero exit discards everything parsed so far.
    pub async fn fetch(&self, locator: &str) -> Result<FetchReport, ExportError> {
        let args = Self::build_args(locator);
        tracing::info!("[Fetcher] Running: {} {}", self.helper, args.join(" "));

        let mut helper = HelperProcess::spawn(&self.helper, &args)?;

        let report = match collect_entries(&mut helper).await {
            Ok(report) => report,
            Err(e) => {
                helper.abort().await;
                return Err(e);
            }
        };

        if let Err(e) = helper.finish().await {
            if let ExportError::HelperFailed { status, stderr } = &e {
                tracing::error!(
                    "[Fetcher] {} exited with status {:?}; discarding {} parsed entries",
                    self.helper,
                    status,
                    report.entries.len()
                );
                if let Some(line) = last_error_line(stderr) {
                    tracing::error!("[Fetcher] Last error: {}", line);
                }
                if let Some(reason) = diagnose_error(stderr) {
                    tracing::warn!("[Fetcher] {}", reason.hint());
                }
            }
            return Err(e);
        }

        if report.skipped > 0 {
            tracing::warn!(
                "[Fetcher] Parsed {} entries, skipped {} malformed lines",
                report.entries.len(),
                report.skipped
            );
        } else {
            tracing::info!("[Fetcher] Parsed {} entries", report.entries.len());
        }

        Ok(report)
    }
}
