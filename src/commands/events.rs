use crate::common::error::{AppError, ServiceResult};
use crate::models::guard::require_not_paused;
use crate::models::tracker::{MatchTracker, TrackerEvent};
use korfball_tracker_macros::command;
use serde::Deserialize;
use uuid::Uuid;

#[command("new_attack")]
pub fn new_attack(tracker: &mut MatchTracker) -> ServiceResult<()> {
    let running = require_not_paused(tracker)?;
    tracker.add_attack(running.part_id, tracker.viewer().team_id);
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct ShotArgs {
    pub player_id: Uuid,
    pub for_team: bool,
    #[serde(default, alias = "goal_type")]
    pub shot_type: Option<Uuid>,
}

#[command("shot_reg")]
pub fn shot_reg(tracker: &mut MatchTracker, args: ShotArgs) -> ServiceResult<()> {
    let running = require_not_paused(tracker)?;
    require_player(tracker, args.player_id)?;
    if let Some(shot_type) = args.shot_type {
        require_shot_type(tracker, shot_type)?;
    }
    tracker.add_shot(
        running.part_id,
        args.player_id,
        args.for_team,
        false,
        args.shot_type,
    )?;
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct GoalArgs {
    pub player_id: Uuid,
    pub goal_type: Uuid,
    pub for_team: bool,
}

#[command("goal_reg")]
pub fn goal_reg(tracker: &mut MatchTracker, args: GoalArgs) -> ServiceResult<()> {
    let running = require_not_paused(tracker)?;
    require_player(tracker, args.player_id)?;
    require_shot_type(tracker, args.goal_type)?;
    tracker.add_shot(
        running.part_id,
        args.player_id,
        args.for_team,
        true,
        Some(args.goal_type),
    )?;
    tracker.apply_goal_parity(true);
    Ok(())
}

enum Undo {
    Shot { id: Uuid, scored: bool },
    Substitution {
        id: Uuid,
        group_id: Uuid,
        player_in_id: Option<Uuid>,
        player_out_id: Option<Uuid>,
    },
    Pause { id: Uuid, active: bool },
    Attack { id: Uuid },
}

/// Reverts the most recent event of any kind. Without events this is a
/// no-op.
#[command("remove_last_event")]
pub fn remove_last_event(tracker: &mut MatchTracker) -> ServiceResult<()> {
    let undo = match tracker.last_event() {
        None => return Ok(()),
        Some(TrackerEvent::Shot(shot)) => Undo::Shot {
            id: shot.id,
            scored: shot.scored,
        },
        Some(TrackerEvent::PlayerChange(change)) => Undo::Substitution {
            id: change.id,
            group_id: change.player_group_id,
            player_in_id: change.player_in_id,
            player_out_id: change.player_out_id,
        },
        Some(TrackerEvent::Pause(pause)) => Undo::Pause {
            id: pause.id,
            active: pause.active,
        },
        Some(TrackerEvent::Attack(attack)) => Undo::Attack { id: attack.id },
    };

    match undo {
        Undo::Shot { id, scored } => {
            tracker.delete_shot(id);
            if scored {
                tracker.apply_goal_parity(false);
            }
        }
        Undo::Substitution {
            id,
            group_id,
            player_in_id,
            player_out_id,
        } => {
            if let (Some(player_in), Some(player_out)) = (player_in_id, player_out_id) {
                let reserve_id = tracker
                    .group(group_id)
                    .and_then(|group| tracker.reserve_group(group.team_id))
                    .map(|group| group.id)
                    .ok_or(AppError::PlayerGroupNotFound)?;
                tracker.move_player(player_in, group_id, reserve_id);
                tracker.move_player(player_out, reserve_id, group_id);
            }
            tracker.delete_player_change(id);
        }
        Undo::Pause { id, active } => {
            tracker.delete_timeouts_of(id);
            match active {
                true => tracker.delete_pause(id),
                false => tracker.reopen_pause(id),
            }
        }
        Undo::Attack { id } => tracker.delete_attack(id),
    }
    Ok(())
}

/// Kept for older clients; reserve players are part of every snapshot.
#[command("get_non_active_players")]
pub fn get_non_active_players(_tracker: &mut MatchTracker) -> ServiceResult<()> {
    Ok(())
}

fn require_player(tracker: &MatchTracker, player_id: Uuid) -> ServiceResult<()> {
    match tracker.knows_player(player_id) {
        true => Ok(()),
        false => Err(AppError::PlayerNotFound),
    }
}

fn require_shot_type(tracker: &MatchTracker, shot_type_id: Uuid) -> ServiceResult<()> {
    match tracker.knows_shot_type(shot_type_id) {
        true => Ok(()),
        false => Err(AppError::GoalTypeNotFound),
    }
}
