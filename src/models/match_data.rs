use crate::common::error::{AppError, ServiceResult};
use crate::entities::match_data::MatchData as Entity;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Upcoming,
    Active,
    Finished,
}

impl MatchStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Upcoming => "upcoming",
            MatchStatus::Active => "active",
            MatchStatus::Finished => "finished",
        }
    }
}

impl TryFrom<&str> for MatchStatus {
    type Error = AppError;

    fn try_from(value: &str) -> ServiceResult<Self> {
        match value {
            "upcoming" => Ok(MatchStatus::Upcoming),
            "active" => Ok(MatchStatus::Active),
            "finished" => Ok(MatchStatus::Finished),
            _ => Err(AppError::InternalServerError("Unknown match status")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchData {
    pub id: Uuid,
    pub match_id: Uuid,
    pub status: MatchStatus,
    pub parts: i32,
    pub current_part: i32,
    pub part_length_seconds: i32,
    pub home_score: i32,
    pub away_score: i32,
    /// Time of the last command that changed anything in this match.
    pub changed_at: Option<DateTime<Utc>>,
}

impl MatchData {
    pub fn as_entity(&self) -> Entity {
        self.clone().into()
    }

    pub fn is_last_part(&self) -> bool {
        self.current_part >= self.parts
    }
}

impl TryFrom<Entity> for MatchData {
    type Error = AppError;

    fn try_from(value: Entity) -> ServiceResult<Self> {
        Ok(Self {
            id: value.id,
            match_id: value.match_id,
            status: MatchStatus::try_from(value.status.as_str())?,
            parts: value.parts,
            current_part: value.current_part,
            part_length_seconds: value.part_length_seconds,
            home_score: value.home_score,
            away_score: value.away_score,
            changed_at: value.changed_at,
        })
    }
}

impl From<MatchData> for Entity {
    fn from(value: MatchData) -> Self {
        Entity {
            id: value.id,
            match_id: value.match_id,
            status: value.status.as_str().to_owned(),
            parts: value.parts,
            current_part: value.current_part,
            part_length_seconds: value.part_length_seconds,
            home_score: value.home_score,
            away_score: value.away_score,
            changed_at: value.changed_at,
        }
    }
}
