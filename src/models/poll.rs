use crate::models::snapshot::TrackerState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct PollArgs {
    pub since: Option<DateTime<Utc>>,
    pub timeout: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PollResponse {
    Changed(Box<TrackerState>),
    Unchanged {
        changed: bool,
        server_time: DateTime<Utc>,
        last_changed_at: DateTime<Utc>,
    },
}

impl PollResponse {
    pub fn unchanged(server_time: DateTime<Utc>, last_changed_at: DateTime<Utc>) -> Self {
        PollResponse::Unchanged {
            changed: false,
            server_time,
            last_changed_at,
        }
    }
}
