use chrono::{DateTime, Utc};

/// Latest timestamp per event column for one match.
#[derive(Debug, Default, sqlx::FromRow)]
pub struct ChangeMarks {
    pub shot_time: Option<DateTime<Utc>>,
    pub player_change_time: Option<DateTime<Utc>>,
    pub pause_start_time: Option<DateTime<Utc>>,
    pub pause_end_time: Option<DateTime<Utc>>,
    pub part_start_time: Option<DateTime<Utc>>,
    pub part_end_time: Option<DateTime<Utc>>,
    pub attack_time: Option<DateTime<Utc>>,
    pub match_data_time: Option<DateTime<Utc>>,
}

impl ChangeMarks {
    pub fn latest(&self) -> Option<DateTime<Utc>> {
        [
            self.shot_time,
            self.player_change_time,
            self.pause_start_time,
            self.pause_end_time,
            self.part_start_time,
            self.part_end_time,
            self.attack_time,
            self.match_data_time,
        ]
        .into_iter()
        .flatten()
        .max()
    }
}
