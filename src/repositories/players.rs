use crate::entities::players::Player;
use sqlx::MySqlConnection;
use uuid::Uuid;

/// Every player placed in one of the match's groups.
pub async fn fetch_in_match(
    conn: &mut MySqlConnection,
    match_data_id: Uuid,
) -> sqlx::Result<Vec<Player>> {
    const QUERY: &str = const_str::concat!(
        "SELECT DISTINCT p.id, p.name FROM players p",
        " INNER JOIN player_group_members m ON m.player_id = p.id",
        " INNER JOIN player_groups g ON g.id = m.player_group_id",
        " WHERE g.match_data_id = ?"
    );
    sqlx::query_as(QUERY)
        .bind(match_data_id)
        .fetch_all(conn)
        .await
}
