// Upload date normalization for yt-dlp's `YYYYMMDD` strings

use time::macros::format_description;
use time::Date;

/// Parse an 8-digit `YYYYMMDD` string into a calendar date.
///
/// Anything else (absent, wrong length, non-digits, impossible month/day)
/// yields `None`. Never fails.
pub fn parse_upload_date(raw: Option<&str>) -> Option<Date> {
    let raw = raw?;
    if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let date = Date::parse(raw, format_description!("[year][month][day]")).ok()?;
    // year 0000 has no counterpart in the proleptic calendar yt-dlp emits
    (date.year() >= 1).then_some(date)
}

/// Render a date as `YYYY-MM-DD`.
pub fn format_date(date: Date) -> Option<String> {
    date.format(format_description!("[year]-[month]-[day]")).ok()
}
