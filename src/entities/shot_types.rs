use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ShotType {
    pub id: Uuid,
    pub name: String,
}
