use crate::models::score::score;
use crate::models::snapshot::TrackerNames;
use crate::models::tracker::{MatchTracker, TrackerEvent};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

const OPPONENT_SUBSTITUTION_NAME: &str = "Wissel tegenstander";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PauseKind {
    Pause,
    Timeout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LastEvent {
    Goal {
        player: Option<String>,
        player_id: Uuid,
        for_team: bool,
        team_id: Uuid,
        time: DateTime<Utc>,
        goal_type: Option<String>,
        goals_for: i32,
        goals_against: i32,
    },
    Shot {
        player: Option<String>,
        player_id: Uuid,
        for_team: bool,
        team_id: Uuid,
        time: DateTime<Utc>,
    },
    Substitute {
        name: Option<String>,
        player_in: Option<String>,
        player_in_id: Option<Uuid>,
        player_out: Option<String>,
        player_out_id: Option<Uuid>,
        time: DateTime<Utc>,
    },
    Pause {
        start_time: DateTime<Utc>,
        end_time: Option<DateTime<Utc>>,
        active: bool,
        event_kind: PauseKind,
        team_id: Option<Uuid>,
    },
    Attack {
        team: Option<String>,
        team_id: Uuid,
        time: DateTime<Utc>,
    },
    NoEvent,
}

pub fn serialize(tracker: &MatchTracker, names: &TrackerNames) -> LastEvent {
    let Some(event) = tracker.last_event() else {
        return LastEvent::NoEvent;
    };

    match event {
        TrackerEvent::Shot(shot) => match shot.shot_type_id.filter(|_| shot.scored) {
            Some(shot_type_id) => {
                let viewer = tracker.viewer();
                LastEvent::Goal {
                    player: names.player(shot.player_id),
                    player_id: shot.player_id,
                    for_team: shot.for_team,
                    team_id: shot.team_id,
                    time: shot.time,
                    goal_type: tracker
                        .rows
                        .shot_types
                        .iter()
                        .find(|shot_type| shot_type.id == shot_type_id)
                        .map(|shot_type| shot_type.name.clone()),
                    goals_for: score(&tracker.rows.shots, viewer.team_id),
                    goals_against: score(&tracker.rows.shots, viewer.opponent_id),
                }
            }
            None => LastEvent::Shot {
                player: names.player(shot.player_id),
                player_id: shot.player_id,
                for_team: shot.for_team,
                team_id: shot.team_id,
                time: shot.time,
            },
        },
        TrackerEvent::PlayerChange(change) => {
            if change.player_in_id.is_none() && change.player_out_id.is_none() {
                LastEvent::Substitute {
                    name: Some(OPPONENT_SUBSTITUTION_NAME.to_owned()),
                    player_in: None,
                    player_in_id: None,
                    player_out: None,
                    player_out_id: None,
                    time: change.time,
                }
            } else {
                LastEvent::Substitute {
                    name: None,
                    player_in: change.player_in_id.and_then(|id| names.player(id)),
                    player_in_id: change.player_in_id,
                    player_out: change.player_out_id.and_then(|id| names.player(id)),
                    player_out_id: change.player_out_id,
                    time: change.time,
                }
            }
        }
        TrackerEvent::Pause(pause) => {
            let timeout = tracker.timeout_for_pause(pause.id);
            LastEvent::Pause {
                start_time: pause.start_time,
                end_time: pause.end_time,
                active: pause.active,
                event_kind: match timeout {
                    Some(_) => PauseKind::Timeout,
                    None => PauseKind::Pause,
                },
                team_id: timeout.map(|timeout| timeout.team_id),
            }
        }
        TrackerEvent::Attack(attack) => LastEvent::Attack {
            team: names.team(attack.team_id).map(|team| team.name.clone()),
            team_id: attack.team_id,
            time: attack.time,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TrackerFixture;

    #[test]
    fn test_no_event() {
        let fixture = TrackerFixture::new();
        let tracker = fixture.started();
        assert_eq!(serialize(&tracker, &fixture.names), LastEvent::NoEvent);
        let value = serde_json::to_value(LastEvent::NoEvent).unwrap();
        assert_eq!(value, serde_json::json!({"type": "no_event"}));
    }

    #[test]
    fn test_goal_carries_score() {
        let fixture = TrackerFixture::new();
        let mut tracker = fixture.started();
        let part_id = tracker.active_part().unwrap().id;
        let player = fixture.home_attack[0];
        tracker
            .add_shot(part_id, player, true, true, Some(fixture.goal_type_id))
            .unwrap();

        let event = serialize(&tracker, &fixture.names);
        let LastEvent::Goal {
            player: name,
            goal_type,
            goals_for,
            goals_against,
            ..
        } = event
        else {
            panic!("expected goal, got {event:?}");
        };
        assert_eq!(name.as_deref(), Some("Home Attack 1"));
        assert_eq!(goal_type.as_deref(), Some("Strafworp"));
        assert_eq!((goals_for, goals_against), (1, 0));
    }

    #[test]
    fn test_opponent_substitution_marker() {
        let fixture = TrackerFixture::new();
        let mut tracker = fixture.started();
        let part_id = tracker.active_part().unwrap().id;
        let reserve = tracker.reserve_group(fixture.away_team_id).unwrap().id;
        tracker.add_player_change(part_id, reserve, None, None);

        let value = serde_json::to_value(serialize(&tracker, &fixture.names)).unwrap();
        assert_eq!(value["type"], "substitute");
        assert_eq!(value["name"], "Wissel tegenstander");
        assert!(value["player_in_id"].is_null());
        assert!(value["player_out"].is_null());
    }

    #[test]
    fn test_timeout_pause() {
        let fixture = TrackerFixture::new();
        let mut tracker = fixture.started();
        let part_id = tracker.active_part().unwrap().id;
        let pause_id = tracker.open_pause(part_id);
        tracker.add_timeout(part_id, fixture.away_team_id, pause_id);

        let event = serialize(&tracker, &fixture.names);
        assert_eq!(
            event,
            LastEvent::Pause {
                start_time: fixture.start,
                end_time: None,
                active: true,
                event_kind: PauseKind::Timeout,
                team_id: Some(fixture.away_team_id),
            }
        );
    }

    #[test]
    fn test_attack_names_team() {
        let fixture = TrackerFixture::new();
        let mut tracker = fixture.started();
        let part_id = tracker.active_part().unwrap().id;
        tracker.add_attack(part_id, fixture.home_team_id);
        let value = serde_json::to_value(serialize(&tracker, &fixture.names)).unwrap();
        assert_eq!(value["type"], "attack");
        assert_eq!(value["team"], "Fortuna 1");
    }
}
