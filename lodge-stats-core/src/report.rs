//! Text rendering of lodge and venue statistics.

use indexmap::IndexMap;
use std::fmt::Write;

use crate::classify::{AdventureType, classify};
use crate::error::Result;
use crate::lodge::LodgeStats;
use crate::venue::Venues;

/// Sessions per adventure type, in first-encounter order.
pub type TypeBreakdown = IndexMap<AdventureType, usize>;

/// Classify each title and tally the results.
#[must_use]
pub fn breakdown_by_type<S: AsRef<str>>(titles: &[S]) -> TypeBreakdown {
    let mut counts = TypeBreakdown::new();
    for title in titles {
        *counts.entry(classify(title.as_ref())).or_default() += 1;
    }
    counts
}

/// Titles in ascending byte order, leaving the source list untouched.
#[must_use]
pub fn sorted_titles(titles: &[String]) -> Vec<&str> {
    let mut sorted: Vec<&str> = titles.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    sorted
}

/// Render the fixed-layout text report.
///
/// # Errors
///
/// Returns an error only if writing into the buffer fails.
pub fn format_report(venues: &Venues, lodge: &LodgeStats) -> Result<String> {
    let mut out = String::new();

    writeln!(out, "-----------------")?;
    writeln!(out, "LODGE-LEVEL STATS")?;
    writeln!(out, "-----------------")?;
    writeln!(out, "Total venues: {}", venues.len())?;
    writeln!(
        out,
        "Total unique participants: {}",
        lodge.unique_participants.len()
    )?;
    writeln!(out, "Total unique GMs: {}", lodge.unique_gms.len())?;
    writeln!(out, "Total seats: {}", lodge.total_seats())?;
    writeln!(out, "Total sessions: {}", lodge.total_sessions())?;
    writeln!(out)?;
    writeln!(out, "Breakdown by campaign - ")?;

    for (campaign, titles) in &lodge.sessions_by_campaign {
        writeln!(out)?;
        writeln!(out, "\t{campaign}: {} sessions", titles.len())?;

        let sorted = sorted_titles(titles);
        for title in &sorted {
            writeln!(out, "\t\t\t{title}")?;
        }

        writeln!(out, "\t\tSession count by type:")?;
        for (kind, count) in breakdown_by_type(&sorted) {
            writeln!(out, "\t\t\t{kind}: {count}")?;
        }

        writeln!(out, "\t\tSeats: {}", lodge.campaign_seats(campaign))?;
    }

    writeln!(out)?;
    writeln!(out, "---------------")?;
    writeln!(out, "STATS PER VENUE")?;
    writeln!(out, "---------------")?;
    for (name, stats) in venues {
        writeln!(out, "{name}")?;
        writeln!(
            out,
            "\tUnique participants: {}",
            stats.unique_participants.len()
        )?;
        writeln!(out, "\tUnique GMs: {}", stats.unique_gms.len())?;
        writeln!(out, "\tSessions: {}", stats.total_sessions())?;
        writeln!(out, "\tSessions by campaign - ")?;
        for (campaign, titles) in &stats.sessions_by_campaign {
            writeln!(out, "\t\t{campaign}: {}", titles.len())?;
        }
        writeln!(out, "\tSeats: {}", stats.total_seats())?;
        writeln!(out)?;
    }

    Ok(out)
}
