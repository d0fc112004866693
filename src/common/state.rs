use crate::common::clock::Clock;
use sqlx::{MySql, Pool};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: Pool<MySql>,
    pub clock: Arc<dyn Clock>,
}
