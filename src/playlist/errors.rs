// Error types for the playlist export pipeline

use std::fmt;

#[derive(Debug, Clone)]
pub enum ExportError {
    /// yt-dlp is missing or does not answer `--version`
    ToolNotFound(String),

    /// Helper could not be launched for the playlist dump
    Spawn(String),

    /// Helper ran but exited non-zero; stderr is kept verbatim
    HelperFailed {
        status: Option<i32>,
        stderr: String,
    },

    /// Reading the helper's output failed mid-stream
    Io(String),

    /// One line of helper output is not a JSON object
    ParseError(String),

    /// Helper succeeded but produced no entries
    NoVideos,

    /// Writing the CSV file failed
    Export(String),
}

impl ExportError {
    /// Process exit status for this failure.
    ///
    /// 1 is an environment problem, 2 a failed batch, 3 an unwritable output.
    /// An empty playlist is reported but still exits 0.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ToolNotFound(_) => 1,
            Self::Spawn(_) | Self::HelperFailed { .. } | Self::Io(_) | Self::ParseError(_) => 2,
            Self::Export(_) => 3,
            Self::NoVideos => 0,
        }
    }

    /// True for failures that abort the run (everything except an empty result).
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::NoVideos)
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ToolNotFound(tool) => write!(f, "{} is not installed or not in PATH", tool),
            Self::Spawn(msg) => write!(f, "Failed to start helper: {}", msg),
            Self::HelperFailed { stderr, .. } => write!(f, "yt-dlp error: {}", stderr.trim_end()),
            Self::Io(msg) => write!(f, "Failed to read helper output: {}", msg),
            Self::ParseError(msg) => write!(f, "Error parsing JSON: {}", msg),
            Self::NoVideos => write!(f, "No videos found in the playlist or the playlist is private."),
            Self::Export(msg) => write!(f, "Failed to write CSV: {}", msg),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<csv::Error> for ExportError {
    fn from(e: csv::Error) -> Self {
        Self::Export(e.to_string())
    }
}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        Self::Export(e.to_string())
    }
}
