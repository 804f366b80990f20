// CSV export of playlist entries

use std::path::Path;

use serde::Serialize;

use super::dates::format_date;
use super::errors::ExportError;
use super::models::VideoEntry;

/// Column header, in output order. Downstream tools rely on it staying fixed.
pub const FIELDNAMES: [&str; 13] = [
    "Id",
    "Title",
    "URL",
    "Duration",
    "DurationFormatted",
    "Uploader",
    "UploaderUrl",
    "ViewCount",
    "UploadDate",
    "UploadDateFormatted",
    "Description",
    "ThumbnailUrl",
    "PlaylistIndex",
];

/// One output row. Field order must match `FIELDNAMES`.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    id: Option<&'a str>,
    title: Option<&'a str>,
    url: String,
    duration: Option<String>,
    duration_formatted: String,
    uploader: Option<&'a str>,
    uploader_url: Option<&'a str>,
    view_count: Option<i64>,
    upload_date: Option<String>,
    upload_date_formatted: String,
    description: Option<&'a str>,
    thumbnail_url: Option<&'a str>,
    playlist_index: Option<i32>,
}

impl<'a> From<&'a VideoEntry> for CsvRow<'a> {
    fn from(entry: &'a VideoEntry) -> Self {
        Self {
            id: entry.id.as_deref(),
            title: entry.title.as_deref(),
            url: entry.url(),
            duration: entry.duration.map(|d| d.to_string()),
            duration_formatted: entry.duration_formatted(),
            uploader: entry.uploader.as_deref(),
            uploader_url: entry.uploader_url.as_deref(),
            view_count: entry.view_count,
            upload_date: entry.upload_date.and_then(format_date),
            upload_date_formatted: entry.upload_date_formatted(),
            description: entry.description.as_deref(),
            thumbnail_url: entry.thumbnail_url.as_deref(),
            playlist_index: entry.playlist_index,
        }
    }
}

/// Write `entries` to `path` as comma-separated UTF-8 with a header row.
///
/// The file is created or truncated. Rows keep input order, one per entry.
/// Absent values are empty cells except the two formatted columns, which
/// read `N/A`. A failure may leave a partial file behind.
pub fn write_entries(entries: &[VideoEntry], path: &Path) -> Result<usize, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_path(path)?;

    writer.write_record(FIELDNAMES)?;
    for entry in entries {
        writer.serialize(CsvRow::from(entry))?;
    }
    writer.flush()?;

    tracing::info!("[Export] Wrote {} rows to {}", entries.len(), path.display());
    Ok(entries.len())
}
