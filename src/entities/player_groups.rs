use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PlayerGroup {
    pub id: Uuid,
    pub match_data_id: Uuid,
    pub team_id: Uuid,
    pub starting_type: String,
    pub current_type: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PlayerGroupMember {
    pub player_group_id: Uuid,
    pub player_id: Uuid,
    pub position: i32,
}
