use crate::commands;
use crate::common::context::Context;
use crate::common::error::{AppError, ServiceResult};
use crate::entities::match_data::MatchData as MatchDataEntity;
use crate::entities::matches::Match;
use crate::models::match_data::MatchData;
use crate::models::poll::{PollArgs, PollResponse};
use crate::models::snapshot::{TrackerNames, TrackerState, assemble};
use crate::models::tracker::{MatchTracker, Viewer};
use crate::models::watermark::last_changed_at;
use crate::repositories::tracker as event_store;
use crate::repositories::{match_data, matches, players, teams, watermarks};
use crate::settings::AppSettings;
use crate::usecases::long_poll::{self, PollOutcome};
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{Connection, MySqlConnection};
use tracing::info;
use uuid::Uuid;

const DEFAULT_PARTS: i32 = 2;

async fn fetch_match(conn: &mut MySqlConnection, match_id: Uuid) -> ServiceResult<Match> {
    matches::fetch_one(conn, match_id)
        .await?
        .ok_or(AppError::MatchNotFound)
}

/// Header row of the match, created on first access. With `lock` the row
/// stays locked until the transaction ends.
async fn fetch_match_data(
    conn: &mut MySqlConnection,
    match_id: Uuid,
    lock: bool,
) -> ServiceResult<MatchData> {
    async fn read(
        conn: &mut MySqlConnection,
        match_id: Uuid,
        lock: bool,
    ) -> sqlx::Result<Option<MatchDataEntity>> {
        match lock {
            true => match_data::fetch_for_update(conn, match_id).await,
            false => match_data::fetch_by_match(conn, match_id).await,
        }
    }

    let entity = match read(&mut *conn, match_id, lock).await? {
        Some(entity) => entity,
        None => {
            let part_length = AppSettings::get().default_part_length_secs;
            match_data::create_if_missing(&mut *conn, match_id, DEFAULT_PARTS, part_length)
                .await?;
            read(&mut *conn, match_id, lock)
                .await?
                .ok_or(AppError::MatchNotFound)?
        }
    };
    MatchData::try_from(entity)
}

async fn fetch_names(
    conn: &mut MySqlConnection,
    match_info: &Match,
    match_data_id: Uuid,
) -> ServiceResult<TrackerNames> {
    let teams = teams::fetch_pair(&mut *conn, match_info.home_team_id, match_info.away_team_id)
        .await?;
    let players = players::fetch_in_match(&mut *conn, match_data_id)
        .await?
        .into_iter()
        .map(|player| (player.id, player.name))
        .collect();
    Ok(TrackerNames { teams, players })
}

pub async fn fetch_state<C: Context>(
    ctx: &C,
    match_id: Uuid,
    team_id: Uuid,
) -> ServiceResult<TrackerState> {
    let mut conn = ctx.db().acquire().await?;
    sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
        .execute(&mut *conn)
        .await?;
    let mut tx = Connection::begin(&mut *conn).await?;

    let match_info = fetch_match(&mut tx, match_id).await?;
    Viewer::of(&match_info, team_id)?;
    let match_data = fetch_match_data(&mut tx, match_id, false).await?;
    let rows = event_store::load(&mut tx, match_data.id).await?;
    let names = fetch_names(&mut tx, &match_info, match_data.id).await?;
    tx.commit().await?;

    let tracker = MatchTracker::new(match_info, match_data, rows, team_id, ctx.clock().now_utc())?;
    Ok(assemble(&tracker, &names))
}

/// Runs one tracker command under the match header lock and returns the
/// state it produced. Nothing is written when the command fails.
pub async fn apply_command<C: Context>(
    ctx: &C,
    match_id: Uuid,
    team_id: Uuid,
    payload: &Value,
) -> ServiceResult<TrackerState> {
    let settings = AppSettings::get();
    let mut conn = ctx.db().acquire().await?;
    sqlx::query("SET SESSION innodb_lock_wait_timeout = ?")
        .bind(settings.db_lock_wait_timeout.as_secs())
        .execute(&mut *conn)
        .await?;
    sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
        .execute(&mut *conn)
        .await?;
    let mut tx = Connection::begin(&mut *conn).await?;

    let match_info = fetch_match(&mut tx, match_id).await?;
    Viewer::of(&match_info, team_id)?;
    let match_data = fetch_match_data(&mut tx, match_id, true).await?;
    let rows = event_store::load(&mut tx, match_data.id).await?;
    let mut tracker =
        MatchTracker::new(match_info, match_data, rows, team_id, ctx.clock().now_utc())?;

    let command = commands::handle_command(&mut tracker, payload)?;
    let changes = tracker.take_changes();
    info!(
        %match_id,
        %team_id,
        command,
        changes = changes.len(),
        "Applying tracker command"
    );
    event_store::persist(&mut tx, changes).await?;
    let names = fetch_names(&mut tx, &tracker.match_info, tracker.match_data.id).await?;
    tx.commit().await?;

    Ok(assemble(&tracker, &names))
}

async fn current_watermark<C: Context>(
    ctx: &C,
    match_data_id: Uuid,
) -> ServiceResult<DateTime<Utc>> {
    // a deleted match ends the poll instead of waiting out the timeout
    match_data::fetch_one(ctx, match_data_id)
        .await?
        .ok_or(AppError::MatchNotFound)?;
    let marks = watermarks::fetch(ctx, match_data_id).await?;
    Ok(last_changed_at(&marks))
}

pub async fn poll_state<C: Context>(
    ctx: &C,
    match_id: Uuid,
    team_id: Uuid,
    args: PollArgs,
) -> ServiceResult<PollResponse> {
    let timeout = long_poll::clamp_timeout(args.timeout, AppSettings::get().poll_max_timeout);
    let since = args.since.unwrap_or(DateTime::UNIX_EPOCH);

    let match_data_id = {
        let mut conn = ctx.db().acquire().await?;
        let match_info = fetch_match(&mut conn, match_id).await?;
        Viewer::of(&match_info, team_id)?;
        fetch_match_data(&mut conn, match_id, false).await?.id
    };

    let outcome = long_poll::wait_for_change(ctx.clock(), since, timeout, move || {
        current_watermark(ctx, match_data_id)
    })
    .await?;

    match outcome {
        PollOutcome::Changed => {
            let state = fetch_state(ctx, match_id, team_id).await?;
            Ok(PollResponse::Changed(Box::new(state)))
        }
        PollOutcome::Unchanged { last_changed_at } => Ok(PollResponse::unchanged(
            ctx.clock().now_utc(),
            last_changed_at,
        )),
    }
}
