use crate::entities::match_parts::MatchPart;
use sqlx::MySqlConnection;
use uuid::Uuid;

const TABLE_NAME: &str = "match_parts";
const READ_FIELDS: &str = "id, match_data_id, part_number, start_time, end_time, active";

pub async fn fetch_all(
    conn: &mut MySqlConnection,
    match_data_id: Uuid,
) -> sqlx::Result<Vec<MatchPart>> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        " WHERE match_data_id = ? ORDER BY part_number, start_time"
    );
    sqlx::query_as(QUERY)
        .bind(match_data_id)
        .fetch_all(conn)
        .await
}

pub async fn create(conn: &mut MySqlConnection, part: &MatchPart) -> sqlx::Result<()> {
    const QUERY: &str = const_str::concat!(
        "INSERT INTO ",
        TABLE_NAME,
        " (",
        READ_FIELDS,
        ") VALUES (?, ?, ?, ?, ?, ?)"
    );
    sqlx::query(QUERY)
        .bind(part.id)
        .bind(part.match_data_id)
        .bind(part.part_number)
        .bind(part.start_time)
        .bind(part.end_time)
        .bind(part.active)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn update(conn: &mut MySqlConnection, part: &MatchPart) -> sqlx::Result<()> {
    const QUERY: &str = const_str::concat!(
        "UPDATE ",
        TABLE_NAME,
        " SET end_time = ?, active = ? WHERE id = ?"
    );
    sqlx::query(QUERY)
        .bind(part.end_time)
        .bind(part.active)
        .bind(part.id)
        .execute(conn)
        .await?;
    Ok(())
}
