use indexmap::IndexMap;
use log::debug;
use std::collections::HashSet;

use crate::error::{Result, StatsError};
use crate::record::{SessionRecord, signup_user_id};

/// Per-venue statistics keyed by venue name, in discovery order.
pub type Venues = IndexMap<String, VenueStats>;

/// Counts gathered for a single venue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VenueStats {
    pub unique_participants: HashSet<String>,
    pub unique_gms: HashSet<String>,
    /// Scenario titles per campaign, one entry per GM slot.
    pub sessions_by_campaign: IndexMap<String, Vec<String>>,
    pub seats_by_campaign: IndexMap<String, usize>,
}

impl VenueStats {
    #[must_use]
    pub fn total_sessions(&self) -> usize {
        self.sessions_by_campaign.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn total_seats(&self) -> usize {
        self.seats_by_campaign.values().sum()
    }
}

/// Single pass fold of session records into [`Venues`].
#[derive(Debug, Default)]
pub struct VenueAggregator {
    venues: Venues,
    skipped: usize,
}

impl VenueAggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one record into the running statistics.
    ///
    /// Every named venue is registered, even when the record itself is not
    /// counted.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::MissingVenue`] or [`StatsError::IncompleteSession`]
    /// when a counted record lacks a field it needs.
    pub fn fold(&mut self, record: &SessionRecord) -> Result<()> {
        let venue_name = record.venue_name();
        if let Some(name) = venue_name
            && !self.venues.contains_key(name)
        {
            debug!("discovered venue {name:?}");
            self.venues.insert(name.to_string(), VenueStats::default());
        }

        if !record.qualifies() {
            debug!(
                "skipping session {:?} with status {:?}",
                record.uuid, record.status
            );
            self.skipped += 1;
            return Ok(());
        }

        let Some(venue_name) = venue_name else {
            return Err(StatsError::MissingVenue {
                uuid: record.uuid.clone(),
            });
        };
        let (title, campaign) = required_fields(record)?;
        let venue = self
            .venues
            .get_mut(venue_name)
            .ok_or_else(|| StatsError::MissingVenue {
                uuid: record.uuid.clone(),
            })?;

        let sessions = venue
            .sessions_by_campaign
            .entry(campaign.to_string())
            .or_default();
        let seats = venue
            .seats_by_campaign
            .entry(campaign.to_string())
            .or_default();

        let players = record.player_signups();
        venue
            .unique_participants
            .extend(players.iter().filter_map(signup_user_id).map(str::to_string));
        *seats += players.len();

        // Sessions are tallied per GM slot, so a table with two GMs counts twice.
        let gms = record.gm_signups();
        for gm in gms {
            sessions.push(title.to_string());
            if let Some(id) = signup_user_id(gm) {
                venue.unique_gms.insert(id.to_string());
                venue.unique_participants.insert(id.to_string());
            }
        }
        *seats += gms.len();

        Ok(())
    }

    /// Number of records folded in without being counted.
    #[must_use]
    pub const fn skipped(&self) -> usize {
        self.skipped
    }

    #[must_use]
    pub fn finish(self) -> Venues {
        self.venues
    }
}

fn required_fields(record: &SessionRecord) -> Result<(&str, &str)> {
    let missing = |field| StatsError::IncompleteSession {
        field,
        uuid: record.uuid.clone(),
    };
    if record.uuid.is_none() {
        return Err(missing("uuid"));
    }
    let title = record
        .scenario_title()
        .ok_or_else(|| missing("scenario title"))?;
    let campaign = record
        .campaign()
        .and_then(|campaign| campaign.name.as_deref())
        .ok_or_else(|| missing("campaign name"))?;
    Ok((title, campaign))
}

/// Fold all records into per-venue statistics.
///
/// # Errors
///
/// Fails on the first counted record that is missing required data; no
/// partial statistics are returned.
pub fn aggregate_venues(records: &[SessionRecord]) -> Result<Venues> {
    let mut aggregator = VenueAggregator::new();
    for record in records {
        aggregator.fold(record)?;
    }
    log::info!(
        "aggregated {} sessions into {} venues ({} not counted)",
        records.len(),
        aggregator.venues.len(),
        aggregator.skipped()
    );
    Ok(aggregator.finish())
}
