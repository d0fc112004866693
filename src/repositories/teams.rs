use crate::entities::teams::Team;
use sqlx::MySqlConnection;
use uuid::Uuid;

pub async fn fetch_pair(
    conn: &mut MySqlConnection,
    home_team_id: Uuid,
    away_team_id: Uuid,
) -> sqlx::Result<Vec<Team>> {
    const QUERY: &str = const_str::concat!(
        "SELECT t.id, t.name, c.name AS club_name FROM teams t",
        " INNER JOIN clubs c ON c.id = t.club_id",
        " WHERE t.id IN (?, ?)"
    );
    sqlx::query_as(QUERY)
        .bind(home_team_id)
        .bind(away_team_id)
        .fetch_all(conn)
        .await
}
