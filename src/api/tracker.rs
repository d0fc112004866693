use crate::api::RequestContext;
use crate::common::error::{AppError, ServiceResponse};
use crate::models::poll::{PollArgs, PollResponse};
use crate::models::snapshot::TrackerState;
use crate::usecases::tracker;
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct TrackerPath {
    pub match_id: Uuid,
    pub team_id: Uuid,
}

// Extractor rejections are answered in the same `{detail, code}` shape as
// every other error.
fn bad_request<E: std::fmt::Display>(rejection: E) -> AppError {
    warn!(%rejection, "Rejected tracker request");
    AppError::InvalidPayload
}

pub async fn fetch(
    ctx: RequestContext,
    path: Result<Path<TrackerPath>, PathRejection>,
) -> ServiceResponse<TrackerState> {
    let Path(path) = path.map_err(bad_request)?;
    let state = tracker::fetch_state(&ctx, path.match_id, path.team_id).await?;
    Ok(Json(state))
}

pub async fn command(
    ctx: RequestContext,
    path: Result<Path<TrackerPath>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ServiceResponse<TrackerState> {
    let Path(path) = path.map_err(bad_request)?;
    let Json(payload) = payload.map_err(bad_request)?;
    let state = tracker::apply_command(&ctx, path.match_id, path.team_id, &payload).await?;
    Ok(Json(state))
}

pub async fn poll(
    ctx: RequestContext,
    path: Result<Path<TrackerPath>, PathRejection>,
    args: Result<Query<PollArgs>, QueryRejection>,
) -> ServiceResponse<PollResponse> {
    let Path(path) = path.map_err(bad_request)?;
    let Query(args) = args.map_err(bad_request)?;
    let response = tracker::poll_state(&ctx, path.match_id, path.team_id, args).await?;
    Ok(Json(response))
}
