use crate::entities::attacks::Attack;
use sqlx::MySqlConnection;
use uuid::Uuid;

const TABLE_NAME: &str = "attacks";
const READ_FIELDS: &str = "id, match_data_id, match_part_id, team_id, time";

pub async fn fetch_all(
    conn: &mut MySqlConnection,
    match_data_id: Uuid,
) -> sqlx::Result<Vec<Attack>> {
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

pub async fn create(conn: &mut MySqlConnection, attack: &Attack) -> sqlx::Result<()> {
    const QUERY: &str = const_str::concat!(
        "INSERT INTO ",
        TABLE_NAME,
        " (",
        READ_FIELDS,
        ") VALUES (?, ?, ?, ?, ?)"
    );
    sqlx::query(QUERY)
        .bind(attack.id)
        .bind(attack.match_data_id)
        .bind(attack.match_part_id)
        .bind(attack.team_id)
        .bind(attack.time)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn delete(conn: &mut MySqlConnection, attack_id: Uuid) -> sqlx::Result<()> {
    const QUERY: &str = const_str::concat!("DELETE FROM ", TABLE_NAME, " WHERE id = ?");
    sqlx::query(QUERY).bind(attack_id).execute(conn).await?;
    Ok(())
}
