use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
}
