use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MatchData {
    pub id: Uuid,
    pub match_id: Uuid,
    pub status: String,
    pub parts: i32,
    pub current_part: i32,
    pub part_length_seconds: i32,
    pub home_score: i32,
    pub away_score: i32,
    pub changed_at: Option<DateTime<Utc>>,
}
