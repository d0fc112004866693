use crate::entities::shots::Shot;
use hashbrown::HashMap;
use serde::Serialize;
use uuid::Uuid;

pub fn score(shots: &[Shot], team_id: Uuid) -> i32 {
    shots
        .iter()
        .filter(|shot| shot.team_id == team_id && shot.scored)
        .count() as _
}

/// Per-player shot counters. `shots_*` count every attempt, `goals_*` the
/// scored subset; `for`/`against` follow the shot's `for_team` flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlayerCounters {
    pub shots_for: u32,
    pub shots_against: u32,
    pub goals_for: u32,
    pub goals_against: u32,
}

pub fn player_counters(shots: &[Shot]) -> HashMap<Uuid, PlayerCounters> {
    let mut counters: HashMap<Uuid, PlayerCounters> = HashMap::new();
    for shot in shots {
        let entry = counters.entry(shot.player_id).or_default();
        match (shot.for_team, shot.scored) {
            (true, true) => {
                entry.shots_for += 1;
                entry.goals_for += 1;
            }
            (true, false) => entry.shots_for += 1,
            (false, true) => {
                entry.shots_against += 1;
                entry.goals_against += 1;
            }
            (false, false) => entry.shots_against += 1,
        }
    }
    counters
}
