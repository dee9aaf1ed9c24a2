use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use lodge_stats_core::{EventSessionsResponse, SessionRecord};
use std::io::Read;
use std::path::Path;

/// Read a saved GraphQL response from disk, or from stdin when `path` is `-`.
pub fn read_response(path: &Path) -> Result<EventSessionsResponse> {
    let json = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read response from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };
    EventSessionsResponse::from_json(&json)
        .with_context(|| format!("{} can't be parsed into event sessions", path.display()))
}

/// Keep the sessions that start inside the reporting window.
pub fn apply_window(
    records: Vec<SessionRecord>,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Vec<SessionRecord> {
    if start.is_none() && end.is_none() {
        return records;
    }
    let total = records.len();
    let kept: Vec<SessionRecord> = records
        .into_iter()
        .filter(|record| record.starts_within(start, end))
        .collect();
    if kept.len() < total {
        log::warn!(
            "dropped {} of {total} sessions outside the reporting window",
            total - kept.len()
        );
    }
    kept
}
