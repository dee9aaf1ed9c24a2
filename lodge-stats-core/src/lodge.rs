use indexmap::IndexMap;
use std::collections::HashSet;

use crate::venue::Venues;

/// Event-wide statistics merged from every venue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LodgeStats {
    pub unique_participants: HashSet<String>,
    pub unique_gms: HashSet<String>,
    pub sessions_by_campaign: IndexMap<String, Vec<String>>,
    pub seats_by_campaign: IndexMap<String, usize>,
}

impl LodgeStats {
    /// Merge per-venue statistics.
    ///
    /// Participant sets are unioned, session titles concatenated in venue order
    /// and seat counts summed per campaign.
    #[must_use]
    pub fn merge(venues: &Venues) -> Self {
        let mut lodge = Self::default();
        for stats in venues.values() {
            lodge
                .unique_participants
                .extend(stats.unique_participants.iter().cloned());
            lodge.unique_gms.extend(stats.unique_gms.iter().cloned());

            for (campaign, titles) in &stats.sessions_by_campaign {
                lodge
                    .sessions_by_campaign
                    .entry(campaign.clone())
                    .or_default()
                    .extend(titles.iter().cloned());
            }
            for (campaign, seats) in &stats.seats_by_campaign {
                *lodge.seats_by_campaign.entry(campaign.clone()).or_default() += seats;
            }
        }
        lodge
    }

    #[must_use]
    pub fn total_sessions(&self) -> usize {
        self.sessions_by_campaign.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn total_seats(&self) -> usize {
        self.seats_by_campaign.values().sum()
    }

    #[must_use]
    pub fn campaign_seats(&self, campaign: &str) -> usize {
        self.seats_by_campaign.get(campaign).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::venue::VenueStats;

    fn venue(
        participants: &[&str],
        gms: &[&str],
        campaigns: &[(&str, &[&str], usize)],
    ) -> VenueStats {
        VenueStats {
            unique_participants: participants.iter().map(|id| (*id).to_string()).collect(),
            unique_gms: gms.iter().map(|id| (*id).to_string()).collect(),
            sessions_by_campaign: campaigns
                .iter()
                .map(|(name, titles, _)| {
                    (
                        (*name).to_string(),
                        titles.iter().map(|t| (*t).to_string()).collect(),
                    )
                })
                .collect(),
            seats_by_campaign: campaigns
                .iter()
                .map(|(name, _, seats)| ((*name).to_string(), *seats))
                .collect(),
        }
    }

    #[test]
    fn merges_zero_venues() {
        let lodge = LodgeStats::merge(&Venues::new());
        assert_eq!(lodge, LodgeStats::default());
        assert_eq!(lodge.total_seats(), 0);
        assert_eq!(lodge.total_sessions(), 0);
    }

    #[test]
    fn unions_sets_and_sums_seats() {
        let mut venues = Venues::new();
        venues.insert(
            "Hall A".to_string(),
            venue(
                &["p1", "p2", "g1"],
                &["g1"],
                &[("Pathfinder Society", &["PFS2 #1-02"][..], 5)],
            ),
        );
        venues.insert(
            "Hall B".to_string(),
            venue(
                &["p2", "g2"],
                &["g2"],
                &[
                    ("Starfinder Society", &["SFS 1-01"][..], 3),
                    ("Pathfinder Society", &["PFS2 #1-01", "PFS2 #1-02"][..], 6),
                ],
            ),
        );

        let lodge = LodgeStats::merge(&venues);
        assert_eq!(lodge.unique_participants.len(), 4);
        assert_eq!(lodge.unique_gms.len(), 2);
        assert_eq!(
            lodge.sessions_by_campaign.keys().collect::<Vec<_>>(),
            ["Pathfinder Society", "Starfinder Society"]
        );
        assert_eq!(
            lodge.sessions_by_campaign["Pathfinder Society"],
            ["PFS2 #1-02", "PFS2 #1-01", "PFS2 #1-02"]
        );
        assert_eq!(lodge.campaign_seats("Pathfinder Society"), 11);
        assert_eq!(lodge.campaign_seats("Starfinder Society"), 3);
        assert_eq!(lodge.campaign_seats("Adventure Card Guild"), 0);
        assert_eq!(lodge.total_seats(), 14);
        assert_eq!(lodge.total_sessions(), 4);
    }
}
