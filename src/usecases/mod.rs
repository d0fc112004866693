pub mod long_poll;
pub mod tracker;
