pub mod guard;
pub mod last_event;
pub mod match_data;
pub mod player_groups;
pub mod poll;
pub mod score;
pub mod snapshot;
pub mod timer;
pub mod tracker;
pub mod watermark;
