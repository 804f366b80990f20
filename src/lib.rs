pub mod config;
pub mod playlist;

use std::path::{Path, PathBuf};

use config::ExporterConfig;
use playlist::{write_entries, ExportError, PlaylistFetcher, ToolProbe};

/// What to export and where
#[derive(Debug, Clone)]
pub struct ExportRequest {
    /// Playlist URL or ID, passed to the helper untouched
    pub playlist_url: String,
    pub output: PathBuf,
}

/// Outcome of a successful export
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub videos: usize,
    pub skipped: usize,
    /// Absolute path of the written file when it can be resolved
    pub output: PathBuf,
}

/// Probe the helper, dump the playlist, write the CSV.
///
/// Steps run strictly in sequence. Nothing is written unless the helper
/// succeeded and produced at least one entry.
pub async fn run(
    request: &ExportRequest,
    config: &ExporterConfig,
) -> Result<ExportSummary, ExportError> {
    let probe = ToolProbe::new(&config.helper, config.probe_timeout);
    if !probe.is_available().await {
        return Err(ExportError::ToolNotFound(probe.program().to_string()));
    }

    println!("Fetching metadata for playlist: {}", request.playlist_url);

    let report = PlaylistFetcher::new(&config.helper)
        .fetch(&request.playlist_url)
        .await?;

    if report.entries.is_empty() {
        return Err(ExportError::NoVideos);
    }

    println!("Found {} videos in the playlist.", report.entries.len());

    let videos = write_entries(&report.entries, &request.output)?;

    Ok(ExportSummary {
        videos,
        skipped: report.skipped,
        output: absolute_path(&request.output),
    })
}

fn absolute_path(path: &Path) -> PathBuf {
    std::fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
