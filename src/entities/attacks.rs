use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Attack {
    pub id: Uuid,
    pub match_data_id: Uuid,
    pub match_part_id: Uuid,
    pub team_id: Uuid,
    pub time: DateTime<Utc>,
}
