use super::*;
use crate::models::last_event::LastEvent;
use crate::models::match_data::MatchStatus;
use crate::models::player_groups::GroupType;
use crate::models::snapshot::{TrackerState, assemble};
use crate::models::timer::Timer;
use crate::testing::TrackerFixture;
use serde_json::json;
use uuid::Uuid;

fn run(tracker: &mut MatchTracker, payload: Value) -> ServiceResult<&'static str> {
    handle_command(tracker, &payload)
}

fn state(fixture: &TrackerFixture, tracker: &MatchTracker) -> TrackerState {
    assemble(tracker, &fixture.names)
}

fn goal(player_id: Uuid, goal_type: Uuid, for_team: bool) -> Value {
    json!({
        "command": "goal_reg",
        "player_id": player_id,
        "goal_type": goal_type,
        "for_team": for_team,
    })
}

fn group_types(tracker: &MatchTracker, team_id: Uuid) -> Vec<(GroupType, GroupType)> {
    tracker
        .rows
        .groups
        .iter()
        .filter(|group| group.team_id == team_id && !group.is_reserve())
        .map(|group| (group.starting_type, group.current_type))
        .collect()
}

fn swapped(tracker: &MatchTracker, team_id: Uuid) -> bool {
    group_types(tracker, team_id)
        .iter()
        .all(|(starting, current)| starting != current)
}

fn unswapped(tracker: &MatchTracker, team_id: Uuid) -> bool {
    group_types(tracker, team_id)
        .iter()
        .all(|(starting, current)| starting == current)
}

#[test]
fn test_dispatch_errors() {
    let fixture = TrackerFixture::new();
    let mut tracker = fixture.tracker();
    assert_eq!(
        run(&mut tracker, json!({})).unwrap_err(),
        AppError::MissingCommand
    );
    assert_eq!(
        run(&mut tracker, json!({"command": "fly"})).unwrap_err(),
        AppError::UnknownCommand
    );
    assert_eq!(
        run(&mut tracker, json!({"command": "timeout"})).unwrap_err(),
        AppError::InvalidPayload
    );
    assert!(tracker.changes().is_empty());
}

#[test]
fn test_every_command_is_registered() {
    let mut names: Vec<&str> = COMMAND_ROUTER.names().collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "get_non_active_players",
            "goal_reg",
            "new_attack",
            "part_end",
            "remove_last_event",
            "shot_reg",
            "start/pause",
            "substitute_against_reg",
            "substitute_reg",
            "timeout",
        ]
    );
}

#[test]
fn test_start_goal_pause_end() {
    let fixture = TrackerFixture::new();
    let mut tracker = fixture.tracker();

    assert_eq!(run(&mut tracker, json!({"command": "start/pause"})), Ok("start/pause"));
    let snapshot = state(&fixture, &tracker);
    assert_eq!(snapshot.status, MatchStatus::Active);
    assert!(matches!(snapshot.timer, Timer::Active { .. }));
    assert!(!snapshot.paused);
    assert_eq!(snapshot.start_stop_label, "Pauze");

    tracker = fixture.after(tracker, 60);
    let scorer = fixture.home_attack[0];
    run(&mut tracker, goal(scorer, fixture.goal_type_id, true)).unwrap();
    let snapshot = state(&fixture, &tracker);
    assert_eq!(snapshot.score.for_team, 1);
    assert!(matches!(snapshot.last_event, LastEvent::Goal { .. }));
    assert!(unswapped(&tracker, fixture.home_team_id));
    assert!(unswapped(&tracker, fixture.away_team_id));

    tracker = fixture.after(tracker, 60);
    run(&mut tracker, goal(fixture.home_attack[1], fixture.goal_type_id, true)).unwrap();
    assert!(swapped(&tracker, fixture.home_team_id));
    assert!(swapped(&tracker, fixture.away_team_id));

    tracker = fixture.after(tracker, 60);
    run(&mut tracker, json!({"command": "start/pause"})).unwrap();
    let snapshot = state(&fixture, &tracker);
    assert!(snapshot.paused);
    assert_eq!(snapshot.start_stop_label, "Start");
    assert!(matches!(snapshot.timer, Timer::Paused { .. }));

    tracker = fixture.after(tracker, 60);
    run(&mut tracker, json!({"command": "part_end"})).unwrap();
    assert!(tracker.active_pause().is_none());
    assert_eq!(tracker.match_data.current_part, 2);
    assert_eq!(tracker.match_data.status, MatchStatus::Active);
    let first_part = &tracker.rows.parts[0];
    assert!(!first_part.active);
    assert_eq!(first_part.end_time, Some(tracker.now()));
}

#[test]
fn test_final_part_end_finishes_with_score() {
    let fixture = TrackerFixture::new();
    let mut tracker = fixture.started();
    run(&mut tracker, goal(fixture.home_attack[0], fixture.goal_type_id, false)).unwrap();
    run(&mut tracker, json!({"command": "part_end"})).unwrap();
    tracker = fixture.after(tracker, 600);
    run(&mut tracker, json!({"command": "start/pause"})).unwrap();
    run(&mut tracker, json!({"command": "part_end"})).unwrap();

    assert_eq!(tracker.match_data.status, MatchStatus::Finished);
    assert_eq!(tracker.match_data.home_score, 0);
    assert_eq!(tracker.match_data.away_score, 1);
    assert!(tracker.active_part().is_none());
    assert_eq!(
        run(&mut tracker, json!({"command": "start/pause"})).unwrap_err(),
        AppError::MatchNotActive
    );
}

#[test]
fn test_opponent_goal_then_undo() {
    let fixture = TrackerFixture::new();
    let mut tracker = fixture.started();
    tracker = fixture.after(tracker, 10);
    run(&mut tracker, json!({"command": "new_attack"})).unwrap();

    tracker = fixture.after(tracker, 10);
    run(&mut tracker, goal(fixture.home_defense[0], fixture.goal_type_id, false)).unwrap();
    let snapshot = state(&fixture, &tracker);
    assert_eq!(snapshot.score.against, 1);
    let LastEvent::Goal { for_team, .. } = snapshot.last_event else {
        panic!("expected goal, got {:?}", snapshot.last_event);
    };
    assert!(!for_team);

    tracker = fixture.after(tracker, 10);
    run(&mut tracker, json!({"command": "remove_last_event"})).unwrap();
    let snapshot = state(&fixture, &tracker);
    assert_eq!(snapshot.score.against, 0);
    assert!(matches!(snapshot.last_event, LastEvent::Attack { .. }));
}

#[test]
fn test_substitution_between_parts() {
    let fixture = TrackerFixture::new();
    let mut tracker = fixture.started();
    let first_part = tracker.active_part().unwrap().id;
    tracker = fixture.after(tracker, 1800);
    run(&mut tracker, json!({"command": "part_end"})).unwrap();
    assert_eq!(tracker.match_data.current_part, 2);

    let (new_player, old_player) = (fixture.home_reserve[0], fixture.home_attack[2]);
    run(
        &mut tracker,
        json!({
            "command": "substitute_reg",
            "new_player_id": new_player,
            "old_player_id": old_player,
        }),
    )
    .unwrap();

    let change = &tracker.rows.player_changes[0];
    assert_eq!(change.match_part_id, first_part);
    let reserve = tracker.reserve_group(fixture.home_team_id).unwrap();
    assert!(reserve.contains(old_player));
    assert!(!reserve.contains(new_player));
    let attack = tracker.field_group_of(fixture.home_team_id, new_player).unwrap();
    assert_eq!(attack.starting_type, GroupType::Attack);
    assert_eq!(change.player_group_id, attack.id);
}

#[test]
fn test_substitution_cap() {
    let fixture = TrackerFixture::new();
    let mut tracker = fixture.started();
    let attack_id = tracker.rows.groups[0].id;

    for _ in 0..8 {
        tracker = fixture.after(tracker, 30);
        let new_player = tracker.reserve_group(fixture.home_team_id).unwrap().players[0];
        let old_player = tracker.group(attack_id).unwrap().players[0];
        run(
            &mut tracker,
            json!({
                "command": "substitute_reg",
                "new_player_id": new_player,
                "old_player_id": old_player,
            }),
        )
        .unwrap();
    }

    tracker = fixture.after(tracker, 30);
    let groups_before = tracker.rows.groups.clone();
    let new_player = tracker.reserve_group(fixture.home_team_id).unwrap().players[0];
    let old_player = tracker.group(attack_id).unwrap().players[0];
    let result = run(
        &mut tracker,
        json!({
            "command": "substitute_reg",
            "new_player_id": new_player,
            "old_player_id": old_player,
        }),
    );
    assert_eq!(result.unwrap_err(), AppError::MaxSubstitutions);
    assert_eq!(result.unwrap_err().http_status_code().as_u16(), 409);
    assert_eq!(tracker.rows.groups, groups_before);
    assert!(tracker.changes().is_empty());

    // the opponent still has their own allowance
    run(&mut tracker, json!({"command": "substitute_against_reg"})).unwrap();
    let snapshot = state(&fixture, &tracker);
    assert_eq!(snapshot.substitutions.for_team, 8);
    assert_eq!(snapshot.substitutions.against, 1);
    assert_eq!(
        snapshot.substitutions.for_team + snapshot.substitutions.against,
        tracker.rows.player_changes.len()
    );
}

#[test]
fn test_substitute_rejects_unknown_players() {
    let fixture = TrackerFixture::new();
    let mut tracker = fixture.started();
    let result = run(
        &mut tracker,
        json!({
            "command": "substitute_reg",
            "new_player_id": fixture.home_attack[0],
            "old_player_id": fixture.home_attack[1],
        }),
    );
    assert_eq!(result.unwrap_err(), AppError::PlayerNotFound);
}

#[test]
fn test_paused_shot_rejected() {
    let fixture = TrackerFixture::new();
    let mut tracker = fixture.started();
    run(&mut tracker, json!({"command": "start/pause"})).unwrap();
    tracker = fixture.after(tracker, 5);
    let shots_before = tracker.rows.shots.len();

    let result = run(
        &mut tracker,
        json!({
            "command": "shot_reg",
            "player_id": fixture.home_attack[0],
            "for_team": true,
        }),
    );
    assert_eq!(result.unwrap_err(), AppError::MatchPaused);
    assert_eq!(result.unwrap_err().http_status_code().as_u16(), 409);
    assert_eq!(tracker.rows.shots.len(), shots_before);
    assert!(tracker.changes().is_empty());
}

#[test]
fn test_shot_reg_accepts_goal_type_alias() {
    let fixture = TrackerFixture::new();
    let mut tracker = fixture.started();
    run(
        &mut tracker,
        json!({
            "command": "shot_reg",
            "player_id": fixture.home_attack[0],
            "for_team": true,
            "goal_type": fixture.goal_type_id,
        }),
    )
    .unwrap();
    let shot = &tracker.rows.shots[0];
    assert!(!shot.scored);
    assert_eq!(shot.shot_type_id, Some(fixture.goal_type_id));
    assert_eq!(shot.team_id, fixture.home_team_id);
}

#[test]
fn test_goal_reg_validates_references() {
    let fixture = TrackerFixture::new();
    let mut tracker = fixture.started();
    assert_eq!(
        run(&mut tracker, goal(Uuid::now_v7(), fixture.goal_type_id, true)).unwrap_err(),
        AppError::PlayerNotFound
    );
    assert_eq!(
        run(&mut tracker, goal(fixture.home_attack[0], Uuid::now_v7(), true)).unwrap_err(),
        AppError::GoalTypeNotFound
    );
    let null_type = json!({
        "command": "goal_reg",
        "player_id": fixture.home_attack[0],
        "goal_type": null,
        "for_team": true,
    });
    assert_eq!(
        run(&mut tracker, null_type).unwrap_err(),
        AppError::InvalidPayload
    );
    assert!(tracker.rows.shots.is_empty());
}

#[test]
fn test_timeout_creates_linked_pause() {
    let fixture = TrackerFixture::new();
    let mut tracker = fixture.started();
    run(&mut tracker, json!({"command": "timeout", "for_team": false})).unwrap();

    let pause = tracker.active_pause().unwrap();
    let timeout = tracker.timeout_for_pause(pause.id).unwrap();
    assert_eq!(timeout.team_id, fixture.away_team_id);
    let snapshot = state(&fixture, &tracker);
    assert!(snapshot.paused);
    assert_eq!(snapshot.timeouts.against, 1);

    assert_eq!(
        run(&mut tracker, json!({"command": "timeout", "for_team": true})).unwrap_err(),
        AppError::MatchPaused
    );
}

#[test]
fn test_undo_timeout_removes_pause_and_timeout() {
    let fixture = TrackerFixture::new();
    let mut tracker = fixture.started();
    run(&mut tracker, json!({"command": "timeout", "for_team": true})).unwrap();
    tracker = fixture.after(tracker, 5);
    run(&mut tracker, json!({"command": "remove_last_event"})).unwrap();
    assert!(tracker.rows.pauses.is_empty());
    assert!(tracker.rows.timeouts.is_empty());
    assert!(!state(&fixture, &tracker).paused);
}

#[test]
fn test_undo_closed_pause_reopens_it() {
    let fixture = TrackerFixture::new();
    let mut tracker = fixture.started();
    run(&mut tracker, json!({"command": "start/pause"})).unwrap();
    tracker = fixture.after(tracker, 30);
    run(&mut tracker, json!({"command": "start/pause"})).unwrap();
    assert!(tracker.active_pause().is_none());

    tracker = fixture.after(tracker, 30);
    run(&mut tracker, json!({"command": "remove_last_event"})).unwrap();
    let pause = tracker.active_pause().unwrap();
    assert_eq!(pause.end_time, None);
}

#[test]
fn test_undo_substitution_restores_membership() {
    let fixture = TrackerFixture::new();
    let mut tracker = fixture.started();
    let (new_player, old_player) = (fixture.home_reserve[3], fixture.home_defense[1]);
    run(
        &mut tracker,
        json!({
            "command": "substitute_reg",
            "new_player_id": new_player,
            "old_player_id": old_player,
        }),
    )
    .unwrap();
    tracker = fixture.after(tracker, 5);
    run(&mut tracker, json!({"command": "remove_last_event"})).unwrap();

    let defense = tracker.field_group_of(fixture.home_team_id, old_player).unwrap();
    assert_eq!(defense.starting_type, GroupType::Defense);
    assert!(!defense.contains(new_player));
    assert!(tracker.reserve_group(fixture.home_team_id).unwrap().contains(new_player));
    assert!(tracker.rows.player_changes.is_empty());
}

#[test]
fn test_undo_without_events_is_noop() {
    let fixture = TrackerFixture::new();
    let mut tracker = fixture.started();
    run(&mut tracker, json!({"command": "remove_last_event"})).unwrap();
    assert!(tracker.changes().is_empty());
    run(&mut tracker, json!({"command": "get_non_active_players"})).unwrap();
    assert!(tracker.changes().is_empty());
}

#[test]
fn test_position_swap_parity_law() {
    let fixture = TrackerFixture::new();
    let mut tracker = fixture.started();
    let steps = [true, true, true, false, true, false, false, true, true, true];
    for (i, add) in steps.into_iter().enumerate() {
        tracker = fixture.after(tracker, 10);
        let payload = match add {
            true => goal(fixture.home_attack[i % 4], fixture.goal_type_id, i % 3 == 0),
            false => json!({"command": "remove_last_event"}),
        };
        run(&mut tracker, payload).unwrap();

        let pairs_even = (tracker.total_goals() / 2) % 2 == 0;
        for team_id in [fixture.home_team_id, fixture.away_team_id] {
            assert_eq!(unswapped(&tracker, team_id), pairs_even, "step {i}");
            assert_eq!(swapped(&tracker, team_id), !pairs_even, "step {i}");
        }
    }
}

#[test]
fn test_undo_then_redo_round_trip() {
    let fixture = TrackerFixture::new();
    let mut tracker = fixture.started();
    run(&mut tracker, goal(fixture.home_attack[0], fixture.goal_type_id, true)).unwrap();
    tracker = fixture.after(tracker, 10);
    run(&mut tracker, goal(fixture.home_attack[1], fixture.goal_type_id, true)).unwrap();
    let before = state(&fixture, &tracker);

    tracker = fixture.after(tracker, 10);
    run(&mut tracker, json!({"command": "remove_last_event"})).unwrap();
    tracker = fixture.after(tracker, 10);
    run(&mut tracker, goal(fixture.home_attack[1], fixture.goal_type_id, true)).unwrap();
    let after = state(&fixture, &tracker);

    assert_eq!(before.score, after.score);
    assert_eq!(before.player_groups, after.player_groups);
    assert_eq!(before.paused, after.paused);
}

#[test]
fn test_watermark_follows_each_command() {
    let fixture = TrackerFixture::new();
    let mut tracker = fixture.tracker();
    let commands = [
        json!({"command": "start/pause"}),
        json!({"command": "new_attack"}),
        goal(fixture.home_attack[0], fixture.goal_type_id, true),
        json!({"command": "substitute_against_reg"}),
        json!({"command": "remove_last_event"}),
        json!({"command": "start/pause"}),
        json!({"command": "start/pause"}),
        json!({"command": "remove_last_event"}),
        json!({"command": "part_end"}),
    ];
    for payload in commands {
        tracker = fixture.after(tracker, 15);
        run(&mut tracker, payload).unwrap();
        assert_eq!(state(&fixture, &tracker).last_changed_at, tracker.now());
    }
}

#[test]
fn test_undo_moves_watermark_forward() {
    let fixture = TrackerFixture::new();
    let mut tracker = fixture.tracker();
    run(&mut tracker, json!({"command": "start/pause"})).unwrap();
    tracker = fixture.after(tracker, 10);
    run(&mut tracker, goal(fixture.home_attack[0], fixture.goal_type_id, true)).unwrap();
    let before = state(&fixture, &tracker).last_changed_at;

    tracker = fixture.after(tracker, 10);
    run(&mut tracker, json!({"command": "remove_last_event"})).unwrap();
    let after = state(&fixture, &tracker).last_changed_at;
    assert!(after > before, "{after} should be later than {before}");
    assert_eq!(after, tracker.now());
    assert_eq!(tracker.match_data.changed_at, Some(tracker.now()));
}

#[test]
fn test_rejected_command_leaves_header_untouched() {
    let fixture = TrackerFixture::new();
    let mut tracker = fixture.started();
    run(&mut tracker, json!({"command": "start/pause"})).unwrap();
    tracker = fixture.after(tracker, 5);
    let changed_at = tracker.match_data.changed_at;
    let result = run(&mut tracker, json!({"command": "timeout", "for_team": true}));
    assert_eq!(result.unwrap_err(), AppError::MatchPaused);
    assert_eq!(tracker.match_data.changed_at, changed_at);
    assert!(tracker.changes().is_empty());
}
