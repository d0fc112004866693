//! Lifecycle preconditions shared by the tracker commands.

use crate::common::error::{AppError, ServiceResult};
use crate::models::match_data::MatchStatus;
use crate::models::tracker::MatchTracker;
use uuid::Uuid;

/// The running part and the opposing team for commands that need the clock
/// to be running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunningPart {
    pub part_id: Uuid,
    pub opponent_id: Uuid,
}

pub fn require_not_paused(tracker: &MatchTracker) -> ServiceResult<RunningPart> {
    if tracker.active_pause().is_some() {
        return Err(AppError::MatchPaused);
    }
    let part = tracker.active_part().ok_or(AppError::NoActivePart)?;
    Ok(RunningPart {
        part_id: part.id,
        opponent_id: tracker.viewer().opponent_id,
    })
}

/// Substitutions may also happen between parts; they then attach to the
/// part that was just played.
pub fn require_substitution_part(tracker: &MatchTracker) -> ServiceResult<Uuid> {
    if tracker.active_pause().is_some() {
        return Err(AppError::MatchPaused);
    }
    if let Some(part) = tracker.active_part() {
        return Ok(part.id);
    }

    let match_data = &tracker.match_data;
    if match_data.status != MatchStatus::Active {
        return Err(AppError::MatchNotActive);
    }
    if match_data.current_part <= 1 {
        return Err(AppError::NoActivePart);
    }

    let parts = &tracker.rows.parts;
    parts
        .iter()
        .find(|part| part.part_number == match_data.current_part - 1)
        .or_else(|| parts.iter().max_by_key(|part| part.start_time))
        .map(|part| part.id)
        .ok_or(AppError::NoActivePart)
}
