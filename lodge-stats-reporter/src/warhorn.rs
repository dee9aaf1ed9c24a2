use anyhow::{Context, Result, bail};
use chrono::{DateTime, SecondsFormat, Utc};
use lodge_stats_core::EventSessionsResponse;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

pub const DEFAULT_HOST: &str = "https://warhorn.net";
const GRAPHQL_PATH: &str = "graphql";
const JSON_CONTENT_TYPE: &str = "application/json";
const OPEN_WINDOW_START: &str = "0001-01-01T00:00:00Z";
const OPEN_WINDOW_END: &str = "9999-12-31T23:59:59Z";

/// Query used when no `--query-file` is given.
pub const EVENT_SESSIONS_QUERY: &str = r"query EventSessions($eventSlug: String!, $start: ISO8601DateTime, $end: ISO8601DateTime) {
  eventSessions(events: [$eventSlug], startsAfter: $start, startsBefore: $end) {
    nodes {
      startsAt
      endsAt
      status
      scenario {
        name
        campaign {
          name
        }
      }
      slot {
        venue {
          name
        }
      }
      uuid
      playerSignups {
        user {
          id
        }
      }
      gmSignups {
        user {
          id
        }
      }
    }
  }
}
";

/// Request body posted to the GraphQL endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphQuery {
    pub query: String,
    pub variables: BTreeMap<&'static str, String>,
}

impl GraphQuery {
    /// Build the `eventSessions` request for one event and reporting window.
    ///
    /// An open bound is sent as the first or last instant of the four-digit-year range.
    #[must_use]
    pub fn event_sessions(
        query: impl Into<String>,
        event_slug: &str,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Self {
        let variables = BTreeMap::from([
            ("eventSlug", event_slug.to_string()),
            ("start", format_bound(start, OPEN_WINDOW_START)),
            ("end", format_bound(end, OPEN_WINDOW_END)),
        ]);
        Self {
            query: query.into(),
            variables,
        }
    }
}

/// Load query text from disk, or fall back to [`EVENT_SESSIONS_QUERY`].
pub fn load_query(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read query file {}", path.display())),
        None => Ok(EVENT_SESSIONS_QUERY.to_string()),
    }
}

/// Authenticated client for the event platform's GraphQL API.
#[derive(Clone)]
pub struct WarhornClient {
    http: reqwest::Client,
    endpoint: String,
    token: String,
}

impl WarhornClient {
    pub fn new(host: &str, token: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("lodge-stats/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            endpoint: endpoint_url(host),
            token: token.into(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Execute `query` and decode the session envelope.
    pub async fn fetch_sessions(&self, query: &GraphQuery) -> Result<EventSessionsResponse> {
        log::info!("querying event sessions");
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .header(ACCEPT, JSON_CONTENT_TYPE)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .json(query)
            .send()
            .await
            .with_context(|| format!("request to {} failed", self.endpoint))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("failed to read GraphQL response body")?;
        if !status.is_success() {
            bail!("GraphQL endpoint returned {status}: {body}");
        }

        EventSessionsResponse::from_json(&body)
            .context("GraphQL response can't be parsed into event sessions")
    }
}

impl fmt::Debug for WarhornClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WarhornClient")
            .field("endpoint", &self.endpoint)
            .field("token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

fn format_bound(bound: Option<DateTime<Utc>>, open: &str) -> String {
    bound.map_or_else(
        || open.to_string(),
        |at| at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
    )
}

fn endpoint_url(host: &str) -> String {
    format!("{}/{GRAPHQL_PATH}", host.trim_end_matches('/'))
}
