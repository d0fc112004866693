use crate::entities::match_parts::MatchPart;
use crate::entities::pauses::Pause;
use crate::models::match_data::MatchData;
use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Clock state of the running part. Clients render
/// `length - ((calc_to or now) - time - pause_length)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Timer {
    Deactivated {
        match_data_id: Uuid,
    },
    #[serde(rename = "pause")]
    Paused {
        time: DateTime<Utc>,
        length: i32,
        /// Seconds spent in closed pauses of this part.
        pause_length: f64,
        calc_to: DateTime<Utc>,
        server_time: DateTime<Utc>,
    },
    Active {
        time: DateTime<Utc>,
        length: i32,
        pause_length: f64,
        server_time: DateTime<Utc>,
    },
}

pub fn project(
    match_data: &MatchData,
    part: Option<&MatchPart>,
    pauses: &[Pause],
    now: DateTime<Utc>,
) -> Timer {
    let Some(part) = part.filter(|part| part.active) else {
        return Timer::Deactivated {
            match_data_id: match_data.id,
        };
    };

    let part_pauses = pauses
        .iter()
        .filter(|pause| pause.match_part_id == Some(part.id));
    let closed = part_pauses
        .clone()
        .filter_map(Pause::closed_length)
        .fold(TimeDelta::zero(), |total, length| total + length);
    let pause_length = closed.num_milliseconds() as f64 / 1000.0;

    match part_pauses.filter(|pause| pause.active).last() {
        Some(active_pause) => Timer::Paused {
            time: part.start_time,
            length: match_data.part_length_seconds,
            pause_length,
            calc_to: active_pause.start_time,
            server_time: now,
        },
        None => Timer::Active {
            time: part.start_time,
            length: match_data.part_length_seconds,
            pause_length,
            server_time: now,
        },
    }
}
