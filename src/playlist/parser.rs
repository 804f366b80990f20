// Record parser: one line of `--dump-json` output into a VideoEntry

use serde_json::Value;

use super::dates::parse_upload_date;
use super::errors::ExportError;
use super::models::VideoEntry;

/// Lenient conversion from a JSON value into a typed field.
///
/// `None` means "treat the field as absent": the value was null or could
/// not be coerced. A bad field never rejects the whole entry.
pub trait FromField: Sized {
    fn from_field(value: &Value) -> Option<Self>;
}

impl FromField for String {
    fn from_field(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            other => Some(other.to_string()),
        }
    }
}

impl FromField for f64 {
    fn from_field(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }
}

impl FromField for i64 {
    fn from_field(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral_f64)),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(integral_f64))
            }
            _ => None,
        }
    }
}

impl FromField for i32 {
    fn from_field(value: &Value) -> Option<Self> {
        i64::from_field(value).and_then(|v| i32::try_from(v).ok())
    }
}

/// Accept floats like `12.0`; reject fractions and values outside i64.
fn integral_f64(v: f64) -> Option<i64> {
    if v.is_finite() && v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
        Some(v as i64)
    } else {
        None
    }
}

/// Look up `key` and coerce it, logging values that are present but unusable.
pub fn field<T: FromField>(json: &Value, key: &str) -> Option<T> {
    let value = json.get(key)?;
    let parsed = T::from_field(value);
    if parsed.is_none() && !value.is_null() {
        tracing::debug!("[Parser] Ignoring malformed '{}' value: {}", key, value);
    }
    parsed
}

/// Parse one line of helper output.
///
/// Fails only when the line is not a JSON object; schema mismatches leave
/// the affected field empty.
pub fn parse_entry(line: &str) -> Result<VideoEntry, ExportError> {
    let json: Value =
        serde_json::from_str(line).map_err(|e| ExportError::ParseError(e.to_string()))?;

    if !json.is_object() {
        return Err(ExportError::ParseError(format!(
            "expected a JSON object, got {}",
            value_kind(&json)
        )));
    }

    let upload_date = field::<String>(&json, "upload_date");

    Ok(VideoEntry {
        id: field(&json, "id"),
        title: field(&json, "title"),
        duration: field(&json, "duration"),
        uploader: field(&json, "uploader"),
        uploader_url: field(&json, "uploader_url"),
        view_count: field(&json, "view_count"),
        upload_date: parse_upload_date(upload_date.as_deref()),
        description: field(&json, "description"),
        thumbnail_url: field(&json, "thumbnail"),
        playlist_index: field(&json, "playlist_index"),
    })
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::{Date, Month};

    #[test]
    fn test_full_entry() {
        let line = r#"{"id":"dQw4w9WgXcQ","title":"Never Gonna Give You Up","duration":213,"uploader":"Rick Astley","uploader_url":"https://www.youtube.com/@RickAstleyYT","view_count":1500000000,"upload_date":"20091025","description":"Official video","thumbnail":"https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg","playlist_index":1}"#;
        let entry = parse_entry(line).unwrap();

        assert_eq!(entry.id.as_deref(), Some("dQw4w9WgXcQ"));
        assert_eq!(entry.title.as_deref(), Some("Never Gonna Give You Up"));
        assert_eq!(entry.duration, Some(213.0));
        assert_eq!(entry.uploader.as_deref(), Some("Rick Astley"));
        assert_eq!(entry.uploader_url.as_deref(), Some("https://www.youtube.com/@RickAstleyYT"));
        assert_eq!(entry.view_count, Some(1_500_000_000));
        assert_eq!(
            entry.upload_date,
            Some(Date::from_calendar_date(2009, Month::October, 25).unwrap())
        );
        assert_eq!(entry.description.as_deref(), Some("Official video"));
        assert_eq!(
            entry.thumbnail_url.as_deref(),
            Some("https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg")
        );
        assert_eq!(entry.playlist_index, Some(1));
    }

    #[test]
    fn test_missing_and_null_fields_are_absent() {
        let entry = parse_entry(r#"{"id":"abc","title":null,"duration":null}"#).unwrap();
        assert_eq!(entry.id.as_deref(), Some("abc"));
        assert_eq!(entry.title, None);
        assert_eq!(entry.duration, None);
        assert_eq!(entry.view_count, None);
        assert_eq!(entry.upload_date, None);
        assert_eq!(entry.playlist_index, None);
    }

    #[test]
    fn test_missing_id_keeps_entry() {
        let entry = parse_entry(r#"{"title":"orphan"}"#).unwrap();
        assert_eq!(entry.id, None);
        assert_eq!(entry.title.as_deref(), Some("orphan"));
    }

    #[test]
    fn test_numeric_strings_are_coerced() {
        let entry =
            parse_entry(r#"{"id":"a","duration":"125.5","view_count":"42","playlist_index":"3"}"#)
                .unwrap();
        assert_eq!(entry.duration, Some(125.5));
        assert_eq!(entry.view_count, Some(42));
        assert_eq!(entry.playlist_index, Some(3));
    }

    #[test]
    fn test_malformed_field_is_nulled_not_fatal() {
        let entry =
            parse_entry(r#"{"id":"a","duration":"unknown","view_count":12.5,"title":"kept"}"#)
                .unwrap();
        assert_eq!(entry.duration, None);
        assert_eq!(entry.view_count, None);
        assert_eq!(entry.title.as_deref(), Some("kept"));
    }

    #[test]
    fn test_out_of_range_number_is_nulled_not_fatal() {
        let entry =
            parse_entry(r#"{"id":"keep","title":"T","duration":1e400,"view_count":-1e400}"#)
                .unwrap();
        assert_eq!(entry.id.as_deref(), Some("keep"));
        assert_eq!(entry.title.as_deref(), Some("T"));
        assert_eq!(entry.duration, None);
        assert_eq!(entry.view_count, None);
    }

    #[test]
    fn test_huge_integer_count_is_nulled() {
        let entry = parse_entry(r#"{"id":"a","view_count":99999999999999999999}"#).unwrap();
        assert_eq!(entry.view_count, None);
        assert_eq!(entry.id.as_deref(), Some("a"));
    }

    #[test]
    fn test_integral_float_counts_are_accepted() {
        let entry = parse_entry(r#"{"id":"a","view_count":12.0,"playlist_index":7.0}"#).unwrap();
        assert_eq!(entry.view_count, Some(12));
        assert_eq!(entry.playlist_index, Some(7));
    }

    #[test]
    fn test_playlist_index_out_of_range_is_nulled() {
        let entry = parse_entry(r#"{"id":"a","playlist_index":9999999999}"#).unwrap();
        assert_eq!(entry.playlist_index, None);
    }

    #[test]
    fn test_numeric_upload_date_is_normalized() {
        let entry = parse_entry(r#"{"id":"a","upload_date":20230115}"#).unwrap();
        assert_eq!(
            entry.upload_date,
            Some(Date::from_calendar_date(2023, Month::January, 15).unwrap())
        );
    }

    #[test]
    fn test_bad_upload_date_is_absent() {
        let entry = parse_entry(r#"{"id":"a","upload_date":"2023-01-15"}"#).unwrap();
        assert_eq!(entry.upload_date, None);
    }

    #[test]
    fn test_scalar_title_is_rendered_as_text() {
        let entry = parse_entry(r#"{"id":123,"title":true}"#).unwrap();
        assert_eq!(entry.id.as_deref(), Some("123"));
        assert_eq!(entry.title.as_deref(), Some("true"));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        assert!(matches!(
            parse_entry(r#"{"id": "abc""#),
            Err(ExportError::ParseError(_))
        ));
        assert!(matches!(parse_entry("not json"), Err(ExportError::ParseError(_))));
    }

    #[test]
    fn test_non_object_is_parse_error() {
        let err = parse_entry("[1, 2, 3]").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error parsing JSON: expected a JSON object, got an array"
        );
    }

    #[test]
    fn test_field_helper_tolerates_wrong_types() {
        let json = json!({"n": {"nested": true}, "s": "x"});
        assert_eq!(field::<f64>(&json, "n"), None);
        assert_eq!(field::<i64>(&json, "s"), None);
        assert_eq!(field::<String>(&json, "missing"), None);
        assert_eq!(field::<String>(&json, "s").as_deref(), Some("x"));
    }
}
