use crate::entities::pauses::Pause;
use sqlx::MySqlConnection;
use uuid::Uuid;

const TABLE_NAME: &str = "pauses";
const READ_FIELDS: &str = "id, match_data_id, match_part_id, start_time, end_time, active";

pub async fn fetch_all(conn: &mut MySqlConnection, match_data_id: Uuid) -> sqlx::Result<Vec<Pause>> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        " WHERE match_data_id = ? ORDER BY start_time"
    );
    sqlx::query_as(QUERY)
        .bind(match_data_id)
        .fetch_all(conn)
        .await
}

pub async fn create(conn: &mut MySqlConnection, pause: &Pause) -> sqlx::Result<()> {
    const QUERY: &str = const_str::concat!(
        "INSERT INTO ",
        TABLE_NAME,
        " (",
        READ_FIELDS,
        ") VALUES (?, ?, ?, ?, ?, ?)"
    );
    sqlx::query(QUERY)
        .bind(pause.id)
        .bind(pause.match_data_id)
        .bind(pause.match_part_id)
        .bind(pause.start_time)
        .bind(pause.end_time)
        .bind(pause.active)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn update(conn: &mut MySqlConnection, pause: &Pause) -> sqlx::Result<()> {
    const QUERY: &str = const_str::concat!(
        "UPDATE ",
        TABLE_NAME,
        " SET end_time = ?, active = ? WHERE id = ?"
    );
    sqlx::query(QUERY)
        .bind(pause.end_time)
        .bind(pause.active)
        .bind(pause.id)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn delete(conn: &mut MySqlConnection, pause_id: Uuid) -> sqlx::Result<()> {
    const QUERY: &str = const_str::concat!("DELETE FROM ", TABLE_NAME, " WHERE id = ?");
    sqlx::query(QUERY).bind(pause_id).execute(conn).await?;
    Ok(())
}
