use crate::common::error::{AppError, ServiceResult};
use crate::entities::player_groups::{PlayerGroup as Entity, PlayerGroupMember};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GroupType {
    Attack,
    Defense,
    Reserve,
}

impl GroupType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            GroupType::Attack => "Attack",
            GroupType::Defense => "Defense",
            GroupType::Reserve => "Reserve",
        }
    }

    /// Attack and Defense trade places; Reserve never moves.
    pub const fn swapped(&self) -> Self {
        match self {
            GroupType::Attack => GroupType::Defense,
            GroupType::Defense => GroupType::Attack,
            GroupType::Reserve => GroupType::Reserve,
        }
    }
}

impl TryFrom<&str> for GroupType {
    type Error = AppError;

    fn try_from(value: &str) -> ServiceResult<Self> {
        match value {
            "Attack" => Ok(GroupType::Attack),
            "Defense" => Ok(GroupType::Defense),
            "Reserve" => Ok(GroupType::Reserve),
            _ => Err(AppError::InternalServerError("Unknown player group type")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerGroup {
    pub id: Uuid,
    pub match_data_id: Uuid,
    pub team_id: Uuid,
    pub starting_type: GroupType,
    pub current_type: GroupType,
    /// Members in insertion order.
    pub players: Vec<Uuid>,
}

impl PlayerGroup {
    pub fn is_reserve(&self) -> bool {
        self.starting_type == GroupType::Reserve
    }

    pub fn contains(&self, player_id: Uuid) -> bool {
        self.players.contains(&player_id)
    }

    /// Builds the group from its row and the full member list of the match;
    /// members of other groups are ignored.
    pub fn from_rows(entity: Entity, members: &[PlayerGroupMember]) -> ServiceResult<Self> {
        let mut own: Vec<&PlayerGroupMember> = members
            .iter()
            .filter(|member| member.player_group_id == entity.id)
            .collect();
        own.sort_by_key(|member| member.position);
        Ok(Self {
            id: entity.id,
            match_data_id: entity.match_data_id,
            team_id: entity.team_id,
            starting_type: GroupType::try_from(entity.starting_type.as_str())?,
            current_type: GroupType::try_from(entity.current_type.as_str())?,
            players: own.into_iter().map(|member| member.player_id).collect(),
        })
    }
}
