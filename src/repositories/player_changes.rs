use crate::entities::player_changes::PlayerChange;
use sqlx::MySqlConnection;
use uuid::Uuid;

const TABLE_NAME: &str = "player_changes";
const READ_FIELDS: &str = r#"
id, match_data_id, match_part_id, player_group_id, player_in_id,
player_out_id, time"#;

pub async fn fetch_all(
    conn: &mut MySqlConnection,
    match_data_id: Uuid,
) -> sqlx::Result<Vec<PlayerChange>> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        " WHERE match_data_id = ? ORDER BY time"
    );
    sqlx::query_as(QUERY)
        .bind(match_data_id)
        .fetch_all(conn)
        .await
}

pub async fn create(conn: &mut MySqlConnection, change: &PlayerChange) -> sqlx::Result<()> {
    const QUERY: &str = const_str::concat!(
        "INSERT INTO ",
        TABLE_NAME,
        " (",
        READ_FIELDS,
        ") VALUES (?, ?, ?, ?, ?, ?, ?)"
    );
    sqlx::query(QUERY)
        .bind(change.id)
        .bind(change.match_data_id)
        .bind(change.match_part_id)
        .bind(change.player_group_id)
        .bind(change.player_in_id)
        .bind(change.player_out_id)
        .bind(change.time)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn delete(conn: &mut MySqlConnection, change_id: Uuid) -> sqlx::Result<()> {
    const QUERY: &str = const_str::concat!("DELETE FROM ", TABLE_NAME, " WHERE id = ?");
    sqlx::query(QUERY).bind(change_id).execute(conn).await?;
    Ok(())
}
