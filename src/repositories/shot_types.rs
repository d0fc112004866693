use crate::entities::shot_types::ShotType;
use sqlx::MySqlConnection;

const TABLE_NAME: &str = "shot_types";

pub async fn fetch_all(conn: &mut MySqlConnection) -> sqlx::Result<Vec<ShotType>> {
    const QUERY: &str = const_str::concat!("SELECT id, name FROM ", TABLE_NAME, " ORDER BY name");
    sqlx::query_as(QUERY).fetch_all(conn).await
}
