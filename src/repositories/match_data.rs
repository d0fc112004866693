use crate::common::context::Context;
use crate::entities::match_data::MatchData;
use sqlx::MySqlConnection;
use uuid::Uuid;

const TABLE_NAME: &str = "match_data";
const READ_FIELDS: &str = r#"
id, match_id, status, parts, current_part, part_length_seconds,
home_score, away_score, changed_at"#;

pub async fn fetch_by_match(
    conn: &mut MySqlConnection,
    match_id: Uuid,
) -> sqlx::Result<Option<MatchData>> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        " WHERE match_id = ?"
    );
    sqlx::query_as(QUERY)
        .bind(match_id)
        .fetch_optional(conn)
        .await
}

/// Locks the header row of a match until the surrounding transaction ends.
/// Every command takes this lock first, which serializes writers per match.
pub async fn fetch_for_update(
    conn: &mut MySqlConnection,
    match_id: Uuid,
) -> sqlx::Result<Option<MatchData>> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        " WHERE match_id = ? FOR UPDATE"
    );
    sqlx::query_as(QUERY)
        .bind(match_id)
        .fetch_optional(conn)
        .await
}

pub async fn fetch_one<C: Context>(ctx: &C, match_data_id: Uuid) -> sqlx::Result<Option<MatchData>> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        " WHERE id = ?"
    );
    sqlx::query_as(QUERY)
        .bind(match_data_id)
        .fetch_optional(ctx.db())
        .await
}

/// Inserts the upcoming header for a match. A concurrent insert for the same
/// match wins silently; callers re-read afterwards.
pub async fn create_if_missing(
    conn: &mut MySqlConnection,
    match_id: Uuid,
    parts: i32,
    part_length_seconds: i32,
) -> sqlx::Result<()> {
    const QUERY: &str = const_str::concat!(
        "INSERT IGNORE INTO ",
        TABLE_NAME,
        " (id, match_id, status, parts, current_part, part_length_seconds, home_score, away_score)",
        " VALUES (?, ?, 'upcoming', ?, 1, ?, 0, 0)"
    );
    sqlx::query(QUERY)
        .bind(Uuid::now_v7())
        .bind(match_id)
        .bind(parts)
        .bind(part_length_seconds)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn update(conn: &mut MySqlConnection, match_data: &MatchData) -> sqlx::Result<()> {
    const QUERY: &str = const_str::concat!(
        "UPDATE ",
        TABLE_NAME,
        " SET status = ?, current_part = ?, home_score = ?, away_score = ?, changed_at = ?",
        " WHERE id = ?"
    );
    sqlx::query(QUERY)
        .bind(match_data.status.as_str())
        .bind(match_data.current_part)
        .bind(match_data.home_score)
        .bind(match_data.away_score)
        .bind(match_data.changed_at)
        .bind(match_data.id)
        .execute(conn)
        .await?;
    Ok(())
}
