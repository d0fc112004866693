use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Timeout {
    pub id: Uuid,
    pub match_data_id: Uuid,
    pub match_part_id: Uuid,
    pub team_id: Uuid,
    pub pause_id: Uuid,
}
