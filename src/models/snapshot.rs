use crate::entities::teams::Team;
use crate::entities::watermarks::ChangeMarks;
use crate::models::last_event::{self, LastEvent};
use crate::models::match_data::MatchStatus;
use crate::models::player_groups::GroupType;
use crate::models::score::{PlayerCounters, player_counters, score};
use crate::models::timer::{self, Timer};
use crate::models::tracker::MatchTracker;
use crate::models::watermark::last_changed_at;
use chrono::{DateTime, Utc};
use hashbrown::HashMap;
use serde::Serialize;
use uuid::Uuid;

pub const MAX_SUBSTITUTIONS: usize = 8;
pub const MAX_TIMEOUTS: usize = 2;

const LABEL_PAUSE: &str = "Pauze";
const LABEL_START: &str = "Start";

/// Display names the tracker rows only reference by id.
#[derive(Debug, Clone, Default)]
pub struct TrackerNames {
    pub teams: Vec<Team>,
    pub players: HashMap<Uuid, String>,
}

impl TrackerNames {
    pub fn team(&self, team_id: Uuid) -> Option<&Team> {
        self.teams.iter().find(|team| team.id == team_id)
    }

    pub fn player(&self, player_id: Uuid) -> Option<String> {
        self.players.get(&player_id).cloned()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamView {
    pub id: Uuid,
    pub name: Option<String>,
    pub club_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreView {
    #[serde(rename = "for")]
    pub for_team: i32,
    pub against: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LimitedCount {
    #[serde(rename = "for")]
    pub for_team: usize,
    pub against: usize,
    pub max: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupPlayerView {
    pub id: Uuid,
    pub name: Option<String>,
    #[serde(flatten)]
    pub counters: PlayerCounters,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupView {
    pub id: Uuid,
    pub starting_type: GroupType,
    pub current_type: GroupType,
    pub players: Vec<GroupPlayerView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerRef {
    pub id: Uuid,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReserveView {
    pub id: Uuid,
    pub players: Vec<PlayerRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalTypeView {
    pub id: Uuid,
    pub name: String,
}

/// Unified tracker view returned by every tracker endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackerState {
    pub match_data_id: Uuid,
    pub status: MatchStatus,
    pub parts: i32,
    pub current_part: i32,
    pub part_length: i32,
    pub team: TeamView,
    pub opponent: TeamView,
    pub score: ScoreView,
    pub substitutions: LimitedCount,
    pub timeouts: LimitedCount,
    pub paused: bool,
    pub start_stop_label: &'static str,
    pub timer: Timer,
    pub player_groups: Vec<GroupView>,
    pub reserve_players: Option<ReserveView>,
    pub goal_types: Vec<GoalTypeView>,
    pub last_event: LastEvent,
    pub last_changed_at: DateTime<Utc>,
}

fn team_view(names: &TrackerNames, team_id: Uuid) -> TeamView {
    let team = names.team(team_id);
    TeamView {
        id: team_id,
        name: team.map(|team| team.name.clone()),
        club_name: team.map(|team| team.club_name.clone()),
    }
}

fn group_order(kind: GroupType) -> u8 {
    match kind {
        GroupType::Attack => 0,
        GroupType::Defense => 1,
        GroupType::Reserve => 2,
    }
}

pub fn assemble(tracker: &MatchTracker, names: &TrackerNames) -> TrackerState {
    let viewer = tracker.viewer();
    let match_data = &tracker.match_data;
    let rows = &tracker.rows;
    let paused = tracker.is_paused();
    let counters = player_counters(&rows.shots);

    let mut field_groups: Vec<_> = rows
        .groups
        .iter()
        .filter(|group| group.team_id == viewer.team_id && !group.is_reserve())
        .collect();
    field_groups.sort_by_key(|group| group_order(group.current_type));
    let player_groups = field_groups
        .into_iter()
        .map(|group| GroupView {
            id: group.id,
            starting_type: group.starting_type,
            current_type: group.current_type,
            players: group
                .players
                .iter()
                .map(|player_id| GroupPlayerView {
                    id: *player_id,
                    name: names.player(*player_id),
                    counters: counters.get(player_id).copied().unwrap_or_default(),
                })
                .collect(),
        })
        .collect();

    let reserve_players = tracker
        .reserve_group(viewer.team_id)
        .map(|group| ReserveView {
            id: group.id,
            players: group
                .players
                .iter()
                .map(|player_id| PlayerRef {
                    id: *player_id,
                    name: names.player(*player_id),
                })
                .collect(),
        });

    let mut goal_types: Vec<GoalTypeView> = rows
        .shot_types
        .iter()
        .map(|shot_type| GoalTypeView {
            id: shot_type.id,
            name: shot_type.name.clone(),
        })
        .collect();
    goal_types.sort_by(|a, b| a.name.cmp(&b.name));

    TrackerState {
        match_data_id: match_data.id,
        status: match_data.status,
        parts: match_data.parts,
        current_part: match_data.current_part,
        part_length: match_data.part_length_seconds,
        team: team_view(names, viewer.team_id),
        opponent: team_view(names, viewer.opponent_id),
        score: ScoreView {
            for_team: score(&rows.shots, viewer.team_id),
            against: score(&rows.shots, viewer.opponent_id),
        },
        substitutions: LimitedCount {
            for_team: tracker.substitutions(viewer.team_id),
            against: tracker.substitutions(viewer.opponent_id),
            max: MAX_SUBSTITUTIONS,
        },
        timeouts: LimitedCount {
            for_team: tracker.timeouts(viewer.team_id),
            against: tracker.timeouts(viewer.opponent_id),
            max: MAX_TIMEOUTS,
        },
        paused,
        start_stop_label: match match_data.status == MatchStatus::Active && !paused {
            true => LABEL_PAUSE,
            false => LABEL_START,
        },
        timer: timer::project(match_data, tracker.active_part(), &rows.pauses, tracker.now()),
        player_groups,
        reserve_players,
        goal_types,
        last_event: last_event::serialize(tracker, names),
        last_changed_at: last_changed_at(&ChangeMarks::from(tracker)),
    }
}
