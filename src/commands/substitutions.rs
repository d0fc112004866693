use crate::common::error::{AppError, ServiceResult};
use crate::models::guard::require_substitution_part;
use crate::models::snapshot::MAX_SUBSTITUTIONS;
use crate::models::tracker::MatchTracker;
use korfball_tracker_macros::command;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct SubstituteArgs {
    pub new_player_id: Uuid,
    pub old_player_id: Uuid,
}

/// Swaps a reserve player with a player of one of the viewer's field groups.
#[command("substitute_reg")]
pub fn substitute_reg(tracker: &mut MatchTracker, args: SubstituteArgs) -> ServiceResult<()> {
    let part_id = require_substitution_part(tracker)?;
    let team_id = tracker.viewer().team_id;
    if tracker.substitutions(team_id) >= MAX_SUBSTITUTIONS {
        return Err(AppError::MaxSubstitutions);
    }

    let reserve_id = tracker
        .reserve_group(team_id)
        .filter(|group| group.contains(args.new_player_id))
        .map(|group| group.id)
        .ok_or(AppError::PlayerNotFound)?;
    let field_id = tracker
        .field_group_of(team_id, args.old_player_id)
        .map(|group| group.id)
        .ok_or(AppError::PlayerNotFound)?;

    tracker.move_player(args.old_player_id, field_id, reserve_id);
    tracker.move_player(args.new_player_id, reserve_id, field_id);
    tracker.add_player_change(
        part_id,
        field_id,
        Some(args.new_player_id),
        Some(args.old_player_id),
    );
    Ok(())
}

/// Records that the opponent substituted, without naming players. The
/// marker is attached to the opponent's Reserve group.
#[command("substitute_against_reg")]
pub fn substitute_against_reg(tracker: &mut MatchTracker) -> ServiceResult<()> {
    let part_id = require_substitution_part(tracker)?;
    let opponent_id = tracker.viewer().opponent_id;
    if tracker.substitutions(opponent_id) >= MAX_SUBSTITUTIONS {
        return Err(AppError::MaxSubstitutions);
    }
    let reserve_id = tracker
        .reserve_group(opponent_id)
        .map(|group| group.id)
        .ok_or(AppError::PlayerGroupNotFound)?;
    tracker.add_player_change(part_id, reserve_id, None, None);
    Ok(())
}
