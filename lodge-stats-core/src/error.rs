use thiserror::Error;

/// Fatal failures raised while turning session records into statistics.
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("no sessions present in the event dataset")]
    NoSessions,
    #[error("published session {} has no venue", describe_uuid(.uuid))]
    MissingVenue { uuid: Option<String> },
    #[error("published session {} is missing its {field}", describe_uuid(.uuid))]
    IncompleteSession {
        field: &'static str,
        uuid: Option<String>,
    },
    #[error("failed to render report: {0}")]
    Format(#[from] std::fmt::Error),
}

fn describe_uuid(uuid: &Option<String>) -> String {
    uuid.as_deref()
        .map_or_else(|| "<no uuid>".to_string(), |id| format!("`{id}`"))
}

pub type Result<T> = std::result::Result<T, StatsError>;
