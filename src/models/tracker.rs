use crate::common::error::{AppError, ServiceResult};
use crate::entities::attacks::Attack;
use crate::entities::match_parts::MatchPart;
use crate::entities::matches::Match;
use crate::entities::pauses::Pause;
use crate::entities::player_changes::PlayerChange;
use crate::entities::shot_types::ShotType;
use crate::entities::shots::Shot;
use crate::entities::timeouts::Timeout;
use crate::models::match_data::{MatchData, MatchStatus};
use crate::models::player_groups::{GroupType, PlayerGroup};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// The team a tracker request is made for, and the team it plays against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewer {
    pub team_id: Uuid,
    pub opponent_id: Uuid,
}

impl Viewer {
    pub fn of(match_info: &Match, team_id: Uuid) -> ServiceResult<Self> {
        if team_id == match_info.home_team_id {
            Ok(Self {
                team_id,
                opponent_id: match_info.away_team_id,
            })
        } else if team_id == match_info.away_team_id {
            Ok(Self {
                team_id,
                opponent_id: match_info.home_team_id,
            })
        } else {
            Err(AppError::TeamNotInMatch)
        }
    }

    pub const fn side(&self, for_team: bool) -> Uuid {
        match for_team {
            true => self.team_id,
            false => self.opponent_id,
        }
    }
}

/// Every event row owned by one match.
#[derive(Debug, Clone, Default)]
pub struct TrackerRows {
    pub parts: Vec<MatchPart>,
    pub pauses: Vec<Pause>,
    pub timeouts: Vec<Timeout>,
    pub shots: Vec<Shot>,
    pub groups: Vec<PlayerGroup>,
    pub player_changes: Vec<PlayerChange>,
    pub attacks: Vec<Attack>,
    pub shot_types: Vec<ShotType>,
}

/// A single row-level write, flushed to the store in recording order.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackerChange {
    UpdateMatchData(MatchData),
    InsertPart(MatchPart),
    UpdatePart(MatchPart),
    InsertPause(Pause),
    UpdatePause(Pause),
    DeletePause(Uuid),
    InsertTimeout(Timeout),
    DeleteTimeout(Uuid),
    InsertShot(Shot),
    DeleteShot(Uuid),
    InsertPlayerChange(PlayerChange),
    DeletePlayerChange(Uuid),
    InsertAttack(Attack),
    DeleteAttack(Uuid),
    UpdateGroupType {
        group_id: Uuid,
        current_type: GroupType,
    },
    AddGroupMember {
        group_id: Uuid,
        player_id: Uuid,
    },
    RemoveGroupMember {
        group_id: Uuid,
        player_id: Uuid,
    },
}

#[derive(Debug, Clone, Copy)]
pub enum TrackerEvent<'a> {
    Shot(&'a Shot),
    PlayerChange(&'a PlayerChange),
    Pause(&'a Pause),
    Attack(&'a Attack),
}

impl TrackerEvent<'_> {
    pub fn time(&self) -> DateTime<Utc> {
        match self {
            TrackerEvent::Shot(shot) => shot.time,
            TrackerEvent::PlayerChange(change) => change.time,
            TrackerEvent::Pause(pause) => pause.start_time,
            TrackerEvent::Attack(attack) => attack.time,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            TrackerEvent::Shot(shot) => shot.id,
            TrackerEvent::PlayerChange(change) => change.id,
            TrackerEvent::Pause(pause) => pause.id,
            TrackerEvent::Attack(attack) => attack.id,
        }
    }

    // Identical timestamps resolve shot > substitution > pause > attack.
    const fn precedence(&self) -> u8 {
        match self {
            TrackerEvent::Shot(_) => 3,
            TrackerEvent::PlayerChange(_) => 2,
            TrackerEvent::Pause(_) => 1,
            TrackerEvent::Attack(_) => 0,
        }
    }

    fn sort_key(&self) -> (DateTime<Utc>, u8, Uuid) {
        (self.time(), self.precedence(), self.id())
    }
}

/// Aggregate root of a match during tracking, seen from one team.
///
/// Mutating methods update the in-memory rows and record the matching
/// [`TrackerChange`] so the caller can flush them inside its transaction.
pub struct MatchTracker {
    pub match_info: Match,
    pub match_data: MatchData,
    pub rows: TrackerRows,
    viewer: Viewer,
    now: DateTime<Utc>,
    changes: Vec<TrackerChange>,
}

impl MatchTracker {
    pub fn new(
        match_info: Match,
        match_data: MatchData,
        rows: TrackerRows,
        viewer_team_id: Uuid,
        now: DateTime<Utc>,
    ) -> ServiceResult<Self> {
        let viewer = Viewer::of(&match_info, viewer_team_id)?;
        Ok(Self {
            match_info,
            match_data,
            rows,
            viewer,
            now,
            changes: vec![],
        })
    }

    pub fn viewer(&self) -> Viewer {
        self.viewer
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn changes(&self) -> &[TrackerChange] {
        &self.changes
    }

    pub fn take_changes(&mut self) -> Vec<TrackerChange> {
        std::mem::take(&mut self.changes)
    }

    // reads

    pub fn active_part(&self) -> Option<&MatchPart> {
        self.rows.parts.iter().find(|part| part.active)
    }

    pub fn active_pause(&self) -> Option<&Pause> {
        self.rows.pauses.iter().find(|pause| pause.active)
    }

    pub fn active_pause_in(&self, part_id: Uuid) -> Option<&Pause> {
        self.rows
            .pauses
            .iter()
            .find(|pause| pause.active && pause.match_part_id == Some(part_id))
    }

    pub fn is_paused(&self) -> bool {
        self.match_data.status != MatchStatus::Active
            || self.active_part().is_none()
            || self.active_pause().is_some()
    }

    pub fn total_goals(&self) -> usize {
        self.rows.shots.iter().filter(|shot| shot.scored).count()
    }

    pub fn group(&self, group_id: Uuid) -> Option<&PlayerGroup> {
        self.rows.groups.iter().find(|group| group.id == group_id)
    }

    pub fn reserve_group(&self, team_id: Uuid) -> Option<&PlayerGroup> {
        self.rows
            .groups
            .iter()
            .find(|group| group.team_id == team_id && group.is_reserve())
    }

    /// The non-Reserve group of `team_id` the player currently plays in.
    pub fn field_group_of(&self, team_id: Uuid, player_id: Uuid) -> Option<&PlayerGroup> {
        self.rows.groups.iter().find(|group| {
            group.team_id == team_id && !group.is_reserve() && group.contains(player_id)
        })
    }

    pub fn knows_player(&self, player_id: Uuid) -> bool {
        self.rows.groups.iter().any(|group| group.contains(player_id))
    }

    pub fn knows_shot_type(&self, shot_type_id: Uuid) -> bool {
        self.rows
            .shot_types
            .iter()
            .any(|shot_type| shot_type.id == shot_type_id)
    }

    pub fn substitutions(&self, team_id: Uuid) -> usize {
        self.rows
            .player_changes
            .iter()
            .filter(|change| {
                self.group(change.player_group_id)
                    .is_some_and(|group| group.team_id == team_id)
            })
            .count()
    }

    pub fn timeouts(&self, team_id: Uuid) -> usize {
        self.rows
            .timeouts
            .iter()
            .filter(|timeout| timeout.team_id == team_id)
            .count()
    }

    pub fn timeout_for_pause(&self, pause_id: Uuid) -> Option<&Timeout> {
        self.rows
            .timeouts
            .iter()
            .find(|timeout| timeout.pause_id == pause_id)
    }

    pub fn events(&self) -> impl Iterator<Item = TrackerEvent<'_>> {
        let shots = self.rows.shots.iter().map(TrackerEvent::Shot);
        let changes = self.rows.player_changes.iter().map(TrackerEvent::PlayerChange);
        let pauses = self.rows.pauses.iter().map(TrackerEvent::Pause);
        let attacks = self.rows.attacks.iter().map(TrackerEvent::Attack);
        shots.chain(changes).chain(pauses).chain(attacks)
    }

    /// The event with the greatest timestamp across all kinds.
    pub fn last_event(&self) -> Option<TrackerEvent<'_>> {
        self.events().max_by_key(TrackerEvent::sort_key)
    }

    // writes

    pub fn update_match_data(&mut self, update: impl FnOnce(&mut MatchData)) {
        update(&mut self.match_data);
        self.changes
            .push(TrackerChange::UpdateMatchData(self.match_data.clone()));
    }

    /// Stamps the header with the command time so the watermark never
    /// moves backwards, even when a command only deletes rows.
    pub fn touch(&mut self) {
        let now = self.now;
        self.update_match_data(|match_data| match_data.changed_at = Some(now));
    }

    /// Opens a part numbered after the current part, activating the match
    /// when it is the first one.
    pub fn start_part(&mut self) -> Uuid {
        let part = MatchPart {
            id: Uuid::now_v7(),
            match_data_id: self.match_data.id,
            part_number: self.match_data.current_part,
            start_time: self.now,
            end_time: None,
            active: true,
        };
        let part_id = part.id;
        self.rows.parts.push(part.clone());
        self.changes.push(TrackerChange::InsertPart(part));
        if self.match_data.current_part == 1 {
            self.update_match_data(|match_data| match_data.status = MatchStatus::Active);
        }
        part_id
    }

    pub fn close_part(&mut self, part_id: Uuid) {
        let now = self.now;
        if let Some(part) = self.rows.parts.iter_mut().find(|part| part.id == part_id) {
            part.active = false;
            part.end_time = Some(now);
            self.changes.push(TrackerChange::UpdatePart(part.clone()));
        }
    }

    pub fn open_pause(&mut self, part_id: Uuid) -> Uuid {
        let pause = Pause {
            id: Uuid::now_v7(),
            match_data_id: self.match_data.id,
            match_part_id: Some(part_id),
            start_time: self.now,
            end_time: None,
            active: true,
        };
        let pause_id = pause.id;
        self.rows.pauses.push(pause.clone());
        self.changes.push(TrackerChange::InsertPause(pause));
        pause_id
    }

    pub fn close_pause(&mut self, pause_id: Uuid) {
        let now = self.now;
        if let Some(pause) = self.rows.pauses.iter_mut().find(|p| p.id == pause_id) {
            pause.active = false;
            pause.end_time = Some(now);
            self.changes.push(TrackerChange::UpdatePause(pause.clone()));
        }
    }

    pub fn close_active_pauses(&mut self) {
        let active: Vec<Uuid> = self
            .rows
            .pauses
            .iter()
            .filter(|pause| pause.active)
            .map(|pause| pause.id)
            .collect();
        for pause_id in active {
            self.close_pause(pause_id);
        }
    }

    pub fn reopen_pause(&mut self, pause_id: Uuid) {
        if let Some(pause) = self.rows.pauses.iter_mut().find(|p| p.id == pause_id) {
            pause.active = true;
            pause.end_time = None;
            self.changes.push(TrackerChange::UpdatePause(pause.clone()));
        }
    }

    pub fn delete_pause(&mut self, pause_id: Uuid) {
        self.rows.pauses.retain(|pause| pause.id != pause_id);
        self.changes.push(TrackerChange::DeletePause(pause_id));
    }

    pub fn add_timeout(&mut self, part_id: Uuid, team_id: Uuid, pause_id: Uuid) -> Uuid {
        let timeout = Timeout {
            id: Uuid::now_v7(),
            match_data_id: self.match_data.id,
            match_part_id: part_id,
            team_id,
            pause_id,
        };
        let timeout_id = timeout.id;
        self.rows.timeouts.push(timeout.clone());
        self.changes.push(TrackerChange::InsertTimeout(timeout));
        timeout_id
    }

    pub fn delete_timeouts_of(&mut self, pause_id: Uuid) {
        let doomed: Vec<Uuid> = self
            .rows
            .timeouts
            .iter()
            .filter(|timeout| timeout.pause_id == pause_id)
            .map(|timeout| timeout.id)
            .collect();
        self.rows.timeouts.retain(|timeout| timeout.pause_id != pause_id);
        self.changes
            .extend(doomed.into_iter().map(TrackerChange::DeleteTimeout));
    }

    pub fn add_shot(
        &mut self,
        part_id: Uuid,
        player_id: Uuid,
        for_team: bool,
        scored: bool,
        shot_type_id: Option<Uuid>,
    ) -> ServiceResult<Uuid> {
        if scored && shot_type_id.is_none() {
            return Err(AppError::InvalidPayload);
        }
        let shot = Shot {
            id: Uuid::now_v7(),
            match_data_id: self.match_data.id,
            match_part_id: part_id,
            player_id,
            team_id: self.viewer.side(for_team),
            for_team,
            scored,
            shot_type_id,
            time: self.now,
        };
        let shot_id = shot.id;
        self.rows.shots.push(shot.clone());
        self.changes.push(TrackerChange::InsertShot(shot));
        Ok(shot_id)
    }

    pub fn delete_shot(&mut self, shot_id: Uuid) {
        self.rows.shots.retain(|shot| shot.id != shot_id);
        self.changes.push(TrackerChange::DeleteShot(shot_id));
    }

    pub fn add_attack(&mut self, part_id: Uuid, team_id: Uuid) -> Uuid {
        let attack = Attack {
            id: Uuid::now_v7(),
            match_data_id: self.match_data.id,
            match_part_id: part_id,
            team_id,
            time: self.now,
        };
        let attack_id = attack.id;
        self.rows.attacks.push(attack.clone());
        self.changes.push(TrackerChange::InsertAttack(attack));
        attack_id
    }

    pub fn delete_attack(&mut self, attack_id: Uuid) {
        self.rows.attacks.retain(|attack| attack.id != attack_id);
        self.changes.push(TrackerChange::DeleteAttack(attack_id));
    }

    pub fn add_player_change(
        &mut self,
        part_id: Uuid,
        group_id: Uuid,
        player_in_id: Option<Uuid>,
        player_out_id: Option<Uuid>,
    ) -> Uuid {
        let change = PlayerChange {
            id: Uuid::now_v7(),
            match_data_id: self.match_data.id,
            match_part_id: part_id,
            player_group_id: group_id,
            player_in_id,
            player_out_id,
            time: self.now,
        };
        let change_id = change.id;
        self.rows.player_changes.push(change.clone());
        self.changes.push(TrackerChange::InsertPlayerChange(change));
        change_id
    }

    pub fn delete_player_change(&mut self, change_id: Uuid) {
        self.rows
            .player_changes
            .retain(|change| change.id != change_id);
        self.changes.push(TrackerChange::DeletePlayerChange(change_id));
    }

    /// Moves a player between two groups, appending them to the target.
    pub fn move_player(&mut self, player_id: Uuid, from_group: Uuid, to_group: Uuid) {
        if let Some(group) = self.rows.groups.iter_mut().find(|g| g.id == from_group) {
            group.players.retain(|id| *id != player_id);
            self.changes.push(TrackerChange::RemoveGroupMember {
                group_id: from_group,
                player_id,
            });
        }
        if let Some(group) = self.rows.groups.iter_mut().find(|g| g.id == to_group) {
            group.players.push(player_id);
            self.changes.push(TrackerChange::AddGroupMember {
                group_id: to_group,
                player_id,
            });
        }
    }

    /// Swaps Attack and Defense for the field groups of one team.
    pub fn swap_positions(&mut self, team_id: Uuid) {
        for group in self.rows.groups.iter_mut() {
            if group.team_id != team_id || group.current_type == GroupType::Reserve {
                continue;
            }
            group.current_type = group.current_type.swapped();
            self.changes.push(TrackerChange::UpdateGroupType {
                group_id: group.id,
                current_type: group.current_type,
            });
        }
    }

    /// Field groups of both teams trade places on every second goal. Called
    /// after a goal is added (even total swaps) or removed (odd total swaps
    /// back).
    pub fn apply_goal_parity(&mut self, goal_added: bool) {
        let even = self.total_goals() % 2 == 0;
        if even == goal_added {
            self.swap_positions(self.viewer.team_id);
            self.swap_positions(self.viewer.opponent_id);
        }
    }
}
