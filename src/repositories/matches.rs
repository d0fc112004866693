use crate::entities::matches::Match;
use sqlx::MySqlConnection;
use uuid::Uuid;

const TABLE_NAME: &str = "matches";
const READ_FIELDS: &str = "id, home_team_id, away_team_id, season_id, start_time";

pub async fn fetch_one(conn: &mut MySqlConnection, match_id: Uuid) -> sqlx::Result<Option<Match>> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        " WHERE id = ?"
    );
    sqlx::query_as(QUERY)
        .bind(match_id)
        .fetch_optional(conn)
        .await
}
