//! Pure rendering: fetched data to surface updates

use chrono::{DateTime, Local, NaiveDateTime};

use crate::api::{ActivityEntry, StatusSnapshot};
use crate::surface::Surface;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Visual classification of an activity status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Success,
    Danger,
    Info,
}

impl Badge {
    /// Three-way mapping: "success" and "error" get their own badge,
    /// anything else is informational.
    pub fn classify(status: &str) -> Self {
        match status {
            "success" => Badge::Success,
            "error" => Badge::Danger,
            _ => Badge::Info,
        }
    }
}

impl std::fmt::Display for Badge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Badge::Success => write!(f, "success"),
            Badge::Danger => write!(f, "danger"),
            Badge::Info => write!(f, "info"),
        }
    }
}

/// One rendered activity table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRow {
    pub time: String,
    pub action: String,
    pub badge: Badge,
    pub status: String,
    pub details: String,
}

/// Parse an ISO-8601 timestamp and format it for the local timezone.
///
/// The backend emits naive datetimes (no offset), which are taken as
/// already-local; offset-carrying strings are converted. Anything
/// unparsable is passed through unchanged.
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(&Local).format(TIME_FORMAT).to_string();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.format(TIME_FORMAT).to_string();
    }
    raw.to_string()
}

/// Build table rows from activity entries, preserving input order
pub fn build_rows(entries: &[ActivityEntry]) -> Vec<ActivityRow> {
    entries
        .iter()
        .map(|entry| ActivityRow {
            time: format_timestamp(entry.raw_time()),
            action: entry.action.clone(),
            badge: Badge::classify(&entry.status),
            status: entry.status.clone(),
            details: entry.details.clone(),
        })
        .collect()
}

/// Write the counter snapshot to the surface, verbatim
pub fn render_status(surface: &dyn Surface, snapshot: &StatusSnapshot) {
    surface.show_counters(
        snapshot.pending_posts,
        snapshot.published_today,
        snapshot.error_count,
    );
}

/// Rebuild the activity table from scratch. Always a full replacement,
/// never an append.
pub fn render_activity(surface: &dyn Surface, entries: &[ActivityEntry]) {
    surface.replace_activity(build_rows(entries));
}
