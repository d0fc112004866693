use crate::entities::watermarks::ChangeMarks;
use crate::models::tracker::MatchTracker;
use chrono::{DateTime, Utc};

/// Most recent timestamp of any tracked row; the epoch when nothing
/// happened yet.
pub fn last_changed_at(marks: &ChangeMarks) -> DateTime<Utc> {
    marks.latest().unwrap_or(DateTime::UNIX_EPOCH)
}

impl From<&MatchTracker> for ChangeMarks {
    fn from(tracker: &MatchTracker) -> Self {
        let rows = &tracker.rows;
        ChangeMarks {
            shot_time: rows.shots.iter().map(|shot| shot.time).max(),
            player_change_time: rows.player_changes.iter().map(|c| c.time).max(),
            pause_start_time: rows.pauses.iter().map(|p| p.start_time).max(),
            pause_end_time: rows.pauses.iter().filter_map(|p| p.end_time).max(),
            part_start_time: rows.parts.iter().map(|p| p.start_time).max(),
            part_end_time: rows.parts.iter().filter_map(|p| p.end_time).max(),
            attack_time: rows.attacks.iter().map(|attack| attack.time).max(),
            match_data_time: tracker.match_data.changed_at,
        }
    }
}
