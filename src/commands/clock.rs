use crate::common::error::{AppError, ServiceResult};
use crate::models::guard::require_not_paused;
use crate::models::match_data::MatchStatus;
use crate::models::score::score;
use crate::models::tracker::MatchTracker;
use korfball_tracker_macros::command;
use serde::Deserialize;

/// Starts the next part when none is running, otherwise toggles a pause.
#[command("start/pause")]
pub fn start_pause(tracker: &mut MatchTracker) -> ServiceResult<()> {
    if tracker.match_data.status == MatchStatus::Finished {
        return Err(AppError::MatchNotActive);
    }
    let Some(part_id) = tracker.active_part().map(|part| part.id) else {
        tracker.start_part();
        return Ok(());
    };
    match tracker.active_pause().map(|pause| pause.id) {
        None => {
            tracker.open_pause(part_id);
        }
        Some(pause_id) => tracker.close_pause(pause_id),
    }
    Ok(())
}

/// Ends the running part; ending the last part finishes the match and
/// stores the final score.
#[command("part_end")]
pub fn part_end(tracker: &mut MatchTracker) -> ServiceResult<()> {
    let part_id = tracker
        .active_part()
        .map(|part| part.id)
        .ok_or(AppError::NoActivePart)?;
    tracker.close_active_pauses();

    if tracker.match_data.is_last_part() {
        let home_score = score(&tracker.rows.shots, tracker.match_info.home_team_id);
        let away_score = score(&tracker.rows.shots, tracker.match_info.away_team_id);
        tracker.update_match_data(|match_data| {
            match_data.status = MatchStatus::Finished;
            match_data.home_score = home_score;
            match_data.away_score = away_score;
        });
    } else {
        tracker.update_match_data(|match_data| match_data.current_part += 1);
    }
    tracker.close_part(part_id);
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct TimeoutArgs {
    pub for_team: bool,
}

#[command("timeout")]
pub fn timeout(tracker: &mut MatchTracker, args: TimeoutArgs) -> ServiceResult<()> {
    let running = require_not_paused(tracker)?;
    let pause_id = tracker.open_pause(running.part_id);
    let pause_id = tracker
        .active_pause_in(running.part_id)
        .map(|pause| pause.id)
        .filter(|id| *id == pause_id)
        .ok_or(AppError::InternalServerError("The timeout pause could not be read back."))?;
    let team_id = tracker.viewer().side(args.for_team);
    tracker.add_timeout(running.part_id, team_id, pause_id);
    Ok(())
}
