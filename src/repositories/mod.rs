pub mod attacks;
pub mod match_data;
pub mod match_parts;
pub mod matches;
pub mod pauses;
pub mod player_changes;
pub mod player_groups;
pub mod players;
pub mod shot_types;
pub mod shots;
pub mod teams;
pub mod timeouts;
pub mod tracker;
pub mod watermarks;
