use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Shot {
    pub id: Uuid,
    pub match_data_id: Uuid,
    pub match_part_id: Uuid,
    pub player_id: Uuid,
    pub team_id: Uuid,
    pub for_team: bool,
    pub scored: bool,
    pub shot_type_id: Option<Uuid>,
    pub time: DateTime<Utc>,
}
