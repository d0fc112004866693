use crate::entities::shots::Shot;
use sqlx::MySqlConnection;
use uuid::Uuid;

const TABLE_NAME: &str = "shots";
const READ_FIELDS: &str = r#"
id, match_data_id, match_part_id, player_id, team_id, for_team,
scored, shot_type_id, time"#;

pub async fn fetch_all(conn: &mut MySqlConnection, match_data_id: Uuid) -> sqlx::Result<Vec<Shot>> {
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

pub async fn create(conn: &mut MySqlConnection, shot: &Shot) -> sqlx::Result<()> {
    const QUERY: &str = const_str::concat!(
        "INSERT INTO ",
        TABLE_NAME,
        " (",
        READ_FIELDS,
        ") VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"
    );
    sqlx::query(QUERY)
        .bind(shot.id)
        .bind(shot.match_data_id)
        .bind(shot.match_part_id)
        .bind(shot.player_id)
        .bind(shot.team_id)
        .bind(shot.for_team)
        .bind(shot.scored)
        .bind(shot.shot_type_id)
        .bind(shot.time)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn delete(conn: &mut MySqlConnection, shot_id: Uuid) -> sqlx::Result<()> {
    const QUERY: &str = const_str::concat!("DELETE FROM ", TABLE_NAME, " WHERE id = ?");
    sqlx::query(QUERY).bind(shot_id).execute(conn).await?;
    Ok(())
}
