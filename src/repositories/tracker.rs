use crate::common::error::ServiceResult;
use crate::models::player_groups::PlayerGroup;
use crate::models::tracker::{TrackerChange, TrackerRows};
use crate::repositories::{
    attacks, match_data, match_parts, pauses, player_changes, player_groups, shot_types, shots,
    timeouts,
};
use sqlx::MySqlConnection;
use uuid::Uuid;

/// Reads every event row of a match on the given connection.
pub async fn load(conn: &mut MySqlConnection, match_data_id: Uuid) -> ServiceResult<TrackerRows> {
    let parts = match_parts::fetch_all(&mut *conn, match_data_id).await?;
    let pauses = pauses::fetch_all(&mut *conn, match_data_id).await?;
    let timeouts = timeouts::fetch_all(&mut *conn, match_data_id).await?;
    let shots = shots::fetch_all(&mut *conn, match_data_id).await?;
    let player_changes = player_changes::fetch_all(&mut *conn, match_data_id).await?;
    let attacks = attacks::fetch_all(&mut *conn, match_data_id).await?;
    let shot_types = shot_types::fetch_all(&mut *conn).await?;

    let members = player_groups::fetch_members(&mut *conn, match_data_id).await?;
    let groups = player_groups::fetch_all(&mut *conn, match_data_id)
        .await?
        .into_iter()
        .map(|group| PlayerGroup::from_rows(group, &members))
        .collect::<ServiceResult<Vec<_>>>()?;

    Ok(TrackerRows {
        parts,
        pauses,
        timeouts,
        shots,
        groups,
        player_changes,
        attacks,
        shot_types,
    })
}

/// Writes recorded changes in order. Must run inside the transaction that
/// holds the match header lock.
pub async fn persist(conn: &mut MySqlConnection, changes: Vec<TrackerChange>) -> sqlx::Result<()> {
    for change in changes {
        match change {
            TrackerChange::UpdateMatchData(data) => {
                match_data::update(&mut *conn, &data.as_entity()).await?
            }
            TrackerChange::InsertPart(part) => match_parts::create(&mut *conn, &part).await?,
            TrackerChange::UpdatePart(part) => match_parts::update(&mut *conn, &part).await?,
            TrackerChange::InsertPause(pause) => pauses::create(&mut *conn, &pause).await?,
            TrackerChange::UpdatePause(pause) => pauses::update(&mut *conn, &pause).await?,
            TrackerChange::DeletePause(pause_id) => pauses::delete(&mut *conn, pause_id).await?,
            TrackerChange::InsertTimeout(timeout) => timeouts::create(&mut *conn, &timeout).await?,
            TrackerChange::DeleteTimeout(timeout_id) => {
                timeouts::delete(&mut *conn, timeout_id).await?
            }
            TrackerChange::InsertShot(shot) => shots::create(&mut *conn, &shot).await?,
            TrackerChange::DeleteShot(shot_id) => shots::delete(&mut *conn, shot_id).await?,
            TrackerChange::InsertPlayerChange(change) => {
                player_changes::create(&mut *conn, &change).await?
            }
            TrackerChange::DeletePlayerChange(change_id) => {
                player_changes::delete(&mut *conn, change_id).await?
            }
            TrackerChange::InsertAttack(attack) => attacks::create(&mut *conn, &attack).await?,
            TrackerChange::DeleteAttack(attack_id) => attacks::delete(&mut *conn, attack_id).await?,
            TrackerChange::UpdateGroupType {
                group_id,
                current_type,
            } => {
                player_groups::update_current_type(&mut *conn, group_id, current_type.as_str())
                    .await?
            }
            TrackerChange::AddGroupMember {
                group_id,
                player_id,
            } => player_groups::add_member(&mut *conn, group_id, player_id).await?,
            TrackerChange::RemoveGroupMember {
                group_id,
                player_id,
            } => player_groups::remove_member(&mut *conn, group_id, player_id).await?,
        }
    }
    Ok(())
}
