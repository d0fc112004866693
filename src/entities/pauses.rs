use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Pause {
    pub id: Uuid,
    pub match_data_id: Uuid,
    pub match_part_id: Option<Uuid>,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub active: bool,
}

impl Pause {
    /// Length of a closed pause; open pauses have none yet.
    pub fn closed_length(&self) -> Option<chrono::TimeDelta> {
        match (self.active, self.end_time) {
            (false, Some(end_time)) => Some(end_time - self.start_time),
            _ => None,
        }
    }
}
