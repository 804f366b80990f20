// Data model for one playlist entry

use time::Date;

use super::dates::format_date;

/// Placeholder rendered for formatted fields with no source value
pub const NOT_AVAILABLE: &str = "N/A";

const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";
const TICKS_PER_SECOND: u64 = 10_000_000;

/// One entry of a `--flat-playlist` dump.
///
/// Built once by the parser and never mutated afterwards. The URL and the
/// two formatted fields are computed on demand from the stored fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VideoEntry {
    /// Video id, copied verbatim. A missing id keeps the entry.
    pub id: Option<String>,
    pub title: Option<String>,
    /// Duration in seconds
    pub duration: Option<f64>,
    pub uploader: Option<String>,
    pub uploader_url: Option<String>,
    pub view_count: Option<i64>,
    pub upload_date: Option<Date>,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub playlist_index: Option<i32>,
}

impl VideoEntry {
    /// Canonical watch URL. Degenerates to the bare prefix without an id.
    pub fn url(&self) -> String {
        format!("{}{}", WATCH_URL_PREFIX, self.id.as_deref().unwrap_or(""))
    }

    pub fn duration_formatted(&self) -> String {
        self.duration
            .and_then(format_duration)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    /// `YYYY-MM-DD`, or `N/A` when the upload date is unknown
    pub fn upload_date_formatted(&self) -> String {
        self.upload_date
            .and_then(format_date)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }
}

/// Render seconds as `[-][d.]hh:mm:ss[.fffffff]`.
///
/// Resolution is 100ns. The day prefix appears from 24h upward, the
/// fraction only when non-zero. Non-finite or out-of-range input is `None`.
pub fn format_duration(seconds: f64) -> Option<String> {
    if !seconds.is_finite() {
        return None;
    }

    let ticks = (seconds * TICKS_PER_SECOND as f64).round();
    if ticks.abs() >= i64::MAX as f64 {
        return None;
    }
    let ticks = ticks as i64;

    let mut out = String::new();
    if ticks < 0 {
        out.push('-');
    }

    let ticks = ticks.unsigned_abs();
    let fraction = ticks % TICKS_PER_SECOND;
    let total_secs = ticks / TICKS_PER_SECOND;
    let days = total_secs / 86_400;
    let rem = total_secs % 86_400;

    if days > 0 {
        out.push_str(&format!("{}.", days));
    }
    out.push_str(&format!(
        "{:02}:{:02}:{:02}",
        rem / 3600,
        rem % 3600 / 60,
        rem % 60
    ));
    if fraction > 0 {
        out.push_str(&format!(".{:07}", fraction));
    }

    Some(out)
}
