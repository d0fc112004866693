use crate::common::clock::Clock;
use sqlx::{MySql, Pool};

pub trait Context: Sync + Send {
    fn db(&self) -> &Pool<MySql>;
    fn clock(&self) -> &dyn Clock;
}
