mod command_handler;

pub use command_handler::{CommandRouter, CommandRouterInstance, RegisteredCommand, TrackerCommand};

pub mod clock;
pub mod events;
pub mod substitutions;

use crate::commands;
use crate::common::error::{AppError, ServiceResult};
use crate::models::tracker::MatchTracker;
use serde::Deserialize;
use serde_json::Value;

static COMMAND_ROUTER: CommandRouterInstance = commands![
    clock::start_pause,
    clock::part_end,
    clock::timeout,
    events::new_attack,
    events::shot_reg,
    events::goal_reg,
    events::remove_last_event,
    events::get_non_active_players,
    substitutions::substitute_reg,
    substitutions::substitute_against_reg,
];

/// Arguments of commands that take no payload fields.
#[derive(Debug, Default, Deserialize)]
pub struct NoArgs {}

pub fn command_name(payload: &Value) -> ServiceResult<&str> {
    payload
        .get("command")
        .and_then(Value::as_str)
        .ok_or(AppError::MissingCommand)
}

/// Resolves the command named in `payload` and applies it to the tracker.
/// Returns the name of the command that ran.
pub fn handle_command(tracker: &mut MatchTracker, payload: &Value) -> ServiceResult<&'static str> {
    let name = command_name(payload)?;
    let command = COMMAND_ROUTER.get(name).ok_or(AppError::UnknownCommand)?;
    command.handle(tracker, payload)?;
    if !tracker.changes().is_empty() {
        tracker.touch();
    }
    Ok(command.name)
}

#[cfg(test)]
mod tests;
