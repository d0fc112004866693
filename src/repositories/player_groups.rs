use crate::entities::player_groups::{PlayerGroup, PlayerGroupMember};
use sqlx::MySqlConnection;
use uuid::Uuid;

const TABLE_NAME: &str = "player_groups";
const MEMBERS_TABLE_NAME: &str = "player_group_members";
const READ_FIELDS: &str = "id, match_data_id, team_id, starting_type, current_type";

pub async fn fetch_all(
    conn: &mut MySqlConnection,
    match_data_id: Uuid,
) -> sqlx::Result<Vec<PlayerGroup>> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        " WHERE match_data_id = ? ORDER BY team_id, starting_type"
    );
    sqlx::query_as(QUERY)
        .bind(match_data_id)
        .fetch_all(conn)
        .await
}

/// Members of every group of the match, in position order.
pub async fn fetch_members(
    conn: &mut MySqlConnection,
    match_data_id: Uuid,
) -> sqlx::Result<Vec<PlayerGroupMember>> {
    const QUERY: &str = const_str::concat!(
        "SELECT m.player_group_id, m.player_id, m.position FROM ",
        MEMBERS_TABLE_NAME,
        " m INNER JOIN ",
        TABLE_NAME,
        " g ON g.id = m.player_group_id",
        " WHERE g.match_data_id = ? ORDER BY m.player_group_id, m.position"
    );
    sqlx::query_as(QUERY)
        .bind(match_data_id)
        .fetch_all(conn)
        .await
}

pub async fn update_current_type(
    conn: &mut MySqlConnection,
    group_id: Uuid,
    current_type: &str,
) -> sqlx::Result<()> {
    const QUERY: &str = const_str::concat!(
        "UPDATE ",
        TABLE_NAME,
        " SET current_type = ? WHERE id = ?"
    );
    sqlx::query(QUERY)
        .bind(current_type)
        .bind(group_id)
        .execute(conn)
        .await?;
    Ok(())
}

/// Appends a player behind the current last member of the group.
pub async fn add_member(
    conn: &mut MySqlConnection,
    group_id: Uuid,
    player_id: Uuid,
) -> sqlx::Result<()> {
    const QUERY: &str = const_str::concat!(
        "INSERT INTO ",
        MEMBERS_TABLE_NAME,
        " (player_group_id, player_id, position)",
        " SELECT ?, ?, COALESCE(MAX(position), -1) + 1 FROM ",
        MEMBERS_TABLE_NAME,
        " WHERE player_group_id = ?"
    );
    sqlx::query(QUERY)
        .bind(group_id)
        .bind(player_id)
        .bind(group_id)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn remove_member(
    conn: &mut MySqlConnection,
    group_id: Uuid,
    player_id: Uuid,
) -> sqlx::Result<()> {
    const QUERY: &str = const_str::concat!(
        "DELETE FROM ",
        MEMBERS_TABLE_NAME,
        " WHERE player_group_id = ? AND player_id = ?"
    );
    sqlx::query(QUERY)
        .bind(group_id)
        .bind(player_id)
        .execute(conn)
        .await?;
    Ok(())
}
