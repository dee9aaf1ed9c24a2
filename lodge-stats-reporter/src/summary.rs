//! Count-only JSON view of the event statistics.

use indexmap::IndexMap;
use lodge_stats_core::{EventStats, TypeBreakdown, breakdown_by_type, report::sorted_titles};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub lodge: LodgeSummary,
    pub venues: Vec<VenueSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LodgeSummary {
    pub total_venues: usize,
    pub unique_participants: usize,
    pub unique_gms: usize,
    pub seats: usize,
    pub sessions: usize,
    pub campaigns: Vec<CampaignSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CampaignSummary {
    pub name: String,
    pub sessions: usize,
    pub titles: Vec<String>,
    pub sessions_by_type: TypeBreakdown,
    pub seats: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueSummary {
    pub name: String,
    pub unique_participants: usize,
    pub unique_gms: usize,
    pub sessions: usize,
    pub sessions_by_campaign: IndexMap<String, usize>,
    pub seats: usize,
}

impl ReportSummary {
    /// Reduce the statistics to counts; participant sets are reported by size only.
    #[must_use]
    pub fn build(stats: &EventStats) -> Self {
        let lodge = &stats.lodge;
        let campaigns = lodge
            .sessions_by_campaign
            .iter()
            .map(|(name, titles)| {
                let sorted = sorted_titles(titles);
                CampaignSummary {
                    name: name.clone(),
                    sessions: titles.len(),
                    sessions_by_type: breakdown_by_type(&sorted),
                    titles: sorted.into_iter().map(str::to_string).collect(),
                    seats: lodge.campaign_seats(name),
                }
            })
            .collect();

        let venues = stats
            .venues
            .iter()
            .map(|(name, venue)| VenueSummary {
                name: name.clone(),
                unique_participants: venue.unique_participants.len(),
                unique_gms: venue.unique_gms.len(),
                sessions: venue.total_sessions(),
                sessions_by_campaign: venue
                    .sessions_by_campaign
                    .iter()
                    .map(|(campaign, titles)| (campaign.clone(), titles.len()))
                    .collect(),
                seats: venue.total_seats(),
            })
            .collect();

        Self {
            lodge: LodgeSummary {
                total_venues: stats.venues.len(),
                unique_participants: lodge.unique_participants.len(),
                unique_gms: lodge.unique_gms.len(),
                seats: lodge.total_seats(),
                sessions: lodge.total_sessions(),
                campaigns,
            },
            venues,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
