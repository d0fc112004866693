use crate::entities::timeouts::Timeout;
use sqlx::MySqlConnection;
use uuid::Uuid;

const TABLE_NAME: &str = "timeouts";
const READ_FIELDS: &str = "id, match_data_id, match_part_id, team_id, pause_id";

pub async fn fetch_all(
    conn: &mut MySqlConnection,
    match_data_id: Uuid,
) -> sqlx::Result<Vec<Timeout>> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        " WHERE match_data_id = ?"
    );
    sqlx::query_as(QUERY)
        .bind(match_data_id)
        .fetch_all(conn)
        .await
}

pub async fn create(conn: &mut MySqlConnection, timeout: &Timeout) -> sqlx::Result<()> {
    const QUERY: &str = const_str::concat!(
        "INSERT INTO ",
        TABLE_NAME,
        " (",
        READ_FIELDS,
        ") VALUES (?, ?, ?, ?, ?)"
    );
    sqlx::query(QUERY)
        .bind(timeout.id)
        .bind(timeout.match_data_id)
        .bind(timeout.match_part_id)
        .bind(timeout.team_id)
        .bind(timeout.pause_id)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn delete(conn: &mut MySqlConnection, timeout_id: Uuid) -> sqlx::Result<()> {
    const QUERY: &str = const_str::concat!("DELETE FROM ", TABLE_NAME, " WHERE id = ?");
    sqlx::query(QUERY).bind(timeout_id).execute(conn).await?;
    Ok(())
}
