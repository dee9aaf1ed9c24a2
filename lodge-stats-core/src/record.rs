use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StatsError};

/// Session status that qualifies a record for counting.
pub const PUBLISHED: &str = "PUBLISHED";

/// Envelope returned by the `eventSessions` GraphQL query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSessionsResponse {
    #[serde(default)]
    pub data: Option<EventSessionsData>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSessionsData {
    #[serde(default)]
    pub event_sessions: Option<EventSessionsPage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSessionsPage {
    #[serde(default)]
    pub nodes: Option<Vec<SessionRecord>>,
}

impl EventSessionsResponse {
    /// Load a response from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not match the response shape.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Flatten the envelope into the session list.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::NoSessions`] if any level of the envelope is absent.
    pub fn into_records(self) -> Result<Vec<SessionRecord>> {
        self.data
            .and_then(|data| data.event_sessions)
            .and_then(|page| page.nodes)
            .ok_or(StatsError::NoSessions)
    }
}

/// One scheduled play session as delivered by the event platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    #[serde(default)]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub scenario: Option<Scenario>,
    #[serde(default)]
    pub slot: Option<Slot>,
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub player_signups: Option<Vec<Option<Signup>>>,
    #[serde(default)]
    pub gm_signups: Option<Vec<Option<Signup>>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub campaign: Option<Campaign>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    #[serde(default)]
    pub venue: Option<Venue>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    #[serde(default)]
    pub name: Option<String>,
}

/// A player or GM seat claimed by a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signup {
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<String>,
}

impl Signup {
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().and_then(|user| user.id.as_deref())
    }
}

/// User id of a possibly-null signup entry.
#[must_use]
pub fn signup_user_id(signup: &Option<Signup>) -> Option<&str> {
    signup.as_ref().and_then(Signup::user_id)
}

impl SessionRecord {
    #[must_use]
    pub fn venue_name(&self) -> Option<&str> {
        self.slot
            .as_ref()
            .and_then(|slot| slot.venue.as_ref())
            .and_then(|venue| venue.name.as_deref())
    }

    #[must_use]
    pub fn is_published(&self) -> bool {
        self.status.as_deref() == Some(PUBLISHED)
    }

    #[must_use]
    pub fn campaign(&self) -> Option<&Campaign> {
        self.scenario
            .as_ref()
            .and_then(|scenario| scenario.campaign.as_ref())
    }

    #[must_use]
    pub fn scenario_title(&self) -> Option<&str> {
        self.scenario
            .as_ref()
            .and_then(|scenario| scenario.name.as_deref())
    }

    /// Whether the record contributes to any count beyond venue discovery.
    #[must_use]
    pub fn qualifies(&self) -> bool {
        self.is_published() && self.campaign().is_some()
    }

    /// Player seats, including `null` entries, which still occupy a seat.
    #[must_use]
    pub fn player_signups(&self) -> &[Option<Signup>] {
        self.player_signups.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn gm_signups(&self) -> &[Option<Signup>] {
        self.gm_signups.as_deref().unwrap_or_default()
    }

    /// Whether the session starts inside `[start, end]`.
    ///
    /// Sessions without a start time are always inside.
    #[must_use]
    pub fn starts_within(&self, start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> bool {
        let Some(starts_at) = self.starts_at else {
            return true;
        };
        start.is_none_or(|start| starts_at >= start) && end.is_none_or(|end| starts_at <= end)
    }
}
