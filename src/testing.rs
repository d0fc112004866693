//! Fixtures shared by the unit tests: one upcoming match with populated
//! Attack/Defense/Reserve groups for both teams.

use crate::entities::matches::Match;
use crate::entities::shot_types::ShotType;
use crate::entities::teams::Team;
use crate::models::match_data::{MatchData, MatchStatus};
use crate::models::player_groups::{GroupType, PlayerGroup};
use crate::models::snapshot::TrackerNames;
use crate::models::tracker::{MatchTracker, TrackerRows};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use hashbrown::HashMap;
use uuid::Uuid;

pub struct TrackerFixture {
    pub start: DateTime<Utc>,
    pub match_info: Match,
    pub match_data: MatchData,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub home_attack: Vec<Uuid>,
    pub home_defense: Vec<Uuid>,
    pub home_reserve: Vec<Uuid>,
    pub away_attack: Vec<Uuid>,
    pub away_defense: Vec<Uuid>,
    pub away_reserve: Vec<Uuid>,
    pub goal_type_id: Uuid,
    pub rows: TrackerRows,
    pub names: TrackerNames,
}

fn players(count: usize) -> Vec<Uuid> {
    (0..count).map(|_| Uuid::now_v7()).collect()
}

fn group(match_data_id: Uuid, team_id: Uuid, kind: GroupType, players: &[Uuid]) -> PlayerGroup {
    PlayerGroup {
        id: Uuid::now_v7(),
        match_data_id,
        team_id,
        starting_type: kind,
        current_type: kind,
        players: players.to_vec(),
    }
}

impl TrackerFixture {
    pub fn new() -> Self {
        let start = Utc.with_ymd_and_hms(2024, 3, 9, 14, 30, 0).unwrap();
        let home_team_id = Uuid::now_v7();
        let away_team_id = Uuid::now_v7();
        let match_info = Match {
            id: Uuid::now_v7(),
            home_team_id,
            away_team_id,
            season_id: None,
            start_time: start,
        };
        let match_data = MatchData {
            id: Uuid::now_v7(),
            match_id: match_info.id,
            status: MatchStatus::Upcoming,
            parts: 2,
            current_part: 1,
            part_length_seconds: 1800,
            home_score: 0,
            away_score: 0,
            changed_at: None,
        };

        let (home_attack, home_defense, home_reserve) = (players(4), players(4), players(10));
        let (away_attack, away_defense, away_reserve) = (players(4), players(4), players(10));
        let md = match_data.id;
        let groups = vec![
            group(md, home_team_id, GroupType::Attack, &home_attack),
            group(md, home_team_id, GroupType::Defense, &home_defense),
            group(md, home_team_id, GroupType::Reserve, &home_reserve),
            group(md, away_team_id, GroupType::Attack, &away_attack),
            group(md, away_team_id, GroupType::Defense, &away_defense),
            group(md, away_team_id, GroupType::Reserve, &away_reserve),
        ];

        let goal_type_id = Uuid::now_v7();
        let shot_types = vec![
            ShotType {
                id: goal_type_id,
                name: "Strafworp".to_owned(),
            },
            ShotType {
                id: Uuid::now_v7(),
                name: "Afstandsschot".to_owned(),
            },
            ShotType {
                id: Uuid::now_v7(),
                name: "Doorloopbal".to_owned(),
            },
        ];

        let mut player_names = HashMap::new();
        for (prefix, ids) in [
            ("Home Attack", &home_attack),
            ("Home Defense", &home_defense),
            ("Home Reserve", &home_reserve),
            ("Away Attack", &away_attack),
            ("Away Defense", &away_defense),
            ("Away Reserve", &away_reserve),
        ] {
            for (i, id) in ids.iter().enumerate() {
                player_names.insert(*id, format!("{prefix} {}", i + 1));
            }
        }
        let names = TrackerNames {
            teams: vec![
                Team {
                    id: home_team_id,
                    name: "Fortuna 1".to_owned(),
                    club_name: "Fortuna".to_owned(),
                },
                Team {
                    id: away_team_id,
                    name: "PKC 1".to_owned(),
                    club_name: "PKC".to_owned(),
                },
            ],
            players: player_names,
        };

        Self {
            start,
            match_info,
            match_data,
            home_team_id,
            away_team_id,
            home_attack,
            home_defense,
            home_reserve,
            away_attack,
            away_defense,
            away_reserve,
            goal_type_id,
            rows: TrackerRows {
                groups,
                shot_types,
                ..Default::default()
            },
            names,
        }
    }

    /// Fresh tracker for the home team at the fixture start time.
    pub fn tracker(&self) -> MatchTracker {
        self.tracker_for(self.home_team_id)
    }

    pub fn tracker_for(&self, team_id: Uuid) -> MatchTracker {
        MatchTracker::new(
            self.match_info.clone(),
            self.match_data.clone(),
            self.rows.clone(),
            team_id,
            self.start,
        )
        .unwrap()
    }

    /// Home tracker with the first part running and no pending changes.
    pub fn started(&self) -> MatchTracker {
        let mut tracker = self.tracker();
        tracker.start_part();
        tracker.take_changes();
        tracker
    }

    /// Reloads the tracker `seconds` later, as the next request would.
    pub fn after(&self, tracker: MatchTracker, seconds: i64) -> MatchTracker {
        let now = tracker.now() + TimeDelta::seconds(seconds);
        let team_id = tracker.viewer().team_id;
        MatchTracker::new(
            tracker.match_info,
            tracker.match_data,
            tracker.rows,
            team_id,
            now,
        )
        .unwrap()
    }
}
