//! Lodge Stats Engine
//!
//! Aggregates convention session records into per-venue and event-wide
//! statistics and renders them as a report. Data acquisition and output
//! handling live in the reporter binary; this crate performs no I/O.

pub mod classify;
pub mod error;
pub mod lodge;
pub mod record;
pub mod report;
pub mod venue;

pub use classify::{AdventureType, classify};
pub use error::{Result, StatsError};
pub use lodge::LodgeStats;
pub use record::{
    Campaign, EventSessionsResponse, PUBLISHED, Scenario, SessionRecord, Signup, Slot, User, Venue,
    signup_user_id,
};
pub use report::{TypeBreakdown, breakdown_by_type, format_report, sorted_titles};
pub use venue::{VenueAggregator, VenueStats, Venues, aggregate_venues};

/// Venue and lodge statistics computed from one dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventStats {
    pub venues: Venues,
    pub lodge: LodgeStats,
}

impl EventStats {
    /// Run the venue fold and lodge merge over `records`.
    ///
    /// # Errors
    ///
    /// Returns an error if a counted record is missing required data.
    pub fn from_records(records: &[SessionRecord]) -> Result<Self> {
        let venues = aggregate_venues(records)?;
        let lodge = LodgeStats::merge(&venues);
        Ok(Self { venues, lodge })
    }

    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn render_text(&self) -> Result<String> {
        format_report(&self.venues, &self.lodge)
    }
}
