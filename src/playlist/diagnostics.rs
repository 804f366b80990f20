// Helper failure diagnostics
//
// Classifies yt-dlp's stderr after a failed playlist dump so the log can
// say what probably went wrong. The failure text itself is never altered.

use regex::Regex;

/// Likely cause of a failed playlist dump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// Playlist or video is private
    Private,

    /// Playlist does not exist or was removed
    Unavailable,

    /// Login, age check or membership required
    SignInRequired,

    /// Not available in this region
    GeoBlocked,

    /// HTTP 429 or similar throttling
    RateLimited,

    /// DNS, connection or timeout trouble
    Network,

    /// Locator is not something yt-dlp understands
    UnsupportedUrl,
}

impl FailureReason {
    /// Short hint for the log
    pub fn hint(&self) -> &'static str {
        match self {
            Self::Private => "The playlist is private; only its owner can export it",
            Self::Unavailable => "The playlist does not exist or has been removed",
            Self::SignInRequired => "YouTube requires a signed-in account for this playlist",
            Self::GeoBlocked => "The playlist is not available in your region",
            Self::RateLimited => "YouTube is rate-limiting requests; wait and try again",
            Self::Network => "Network problem while contacting YouTube; check your connection",
            Self::UnsupportedUrl => "yt-dlp does not recognise this playlist URL or ID",
        }
    }
}

/// Classify helper stderr. `None` when nothing recognisable is present.
pub fn diagnose_error(stderr: &str) -> Option<FailureReason> {
    let lower = stderr.to_lowercase();

    // Order matters: "private video" messages often also say "unavailable"
    if lower.contains("private") {
        return Some(FailureReason::Private);
    }

    if lower.contains("sign in")
        || lower.contains("confirm your age")
        || lower.contains("members only")
        || lower.contains("members-only")
    {
        return Some(FailureReason::SignInRequired);
    }

    if lower.contains("not available in your country")
        || lower.contains("geo restriction")
        || lower.contains("geo-restricted")
    {
        return Some(FailureReason::GeoBlocked);
    }

    if lower.contains("429") || lower.contains("too many requests") {
        return Some(FailureReason::RateLimited);
    }

    if lower.contains("does not exist")
        || lower.contains("unavailable")
        || lower.contains("has been removed")
        || lower.contains("http error 404")
    {
        return Some(FailureReason::Unavailable);
    }

    if lower.contains("unsupported url") || lower.contains("is not a valid url") {
        return Some(FailureReason::UnsupportedUrl);
    }

    if lower.contains("timed out")
        || lower.contains("unable to download webpage")
        || lower.contains("name resolution")
        || lower.contains("connection refused")
        || lower.contains("connection reset")
    {
        return Some(FailureReason::Network);
    }

    None
}

/// Text of the last `ERROR:` line yt-dlp printed, if any.
pub fn last_error_line(stderr: &str) -> Option<&str> {
    lazy_static::lazy_static! {
        static ref ERROR_RE: Regex = Regex::new(r"(?m)^ERROR:\s*(.+?)\s*$").unwrap();
    }

    ERROR_RE
        .captures_iter(stderr)
        .last()
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
