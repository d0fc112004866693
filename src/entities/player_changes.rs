use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct PlayerChange {
    pub id: Uuid,
    pub match_data_id: Uuid,
    pub match_part_id: Uuid,
    pub player_group_id: Uuid,
    pub player_in_id: Option<Uuid>,
    pub player_out_id: Option<Uuid>,
    pub time: DateTime<Utc>,
}
