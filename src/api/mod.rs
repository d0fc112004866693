use crate::common::clock::Clock;
use crate::common::context::Context;
use crate::common::error::AppError;
use crate::common::init;
use crate::common::state::AppState;
use crate::settings::AppSettings;
use axum::Router;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::routing::{get, post};
use sqlx::{MySql, Pool};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

pub mod tracker;

pub struct RequestContext {
    pub db: Pool<MySql>,
    pub clock: Arc<dyn Clock>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/match/{match_id}/tracker/{team_id}", get(tracker::fetch))
        .route(
            "/match/{match_id}/tracker/{team_id}/command",
            post(tracker::command),
        )
        .route("/match/{match_id}/tracker/{team_id}/poll", get(tracker::poll))
}

impl FromRequestParts<AppState> for RequestContext {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self {
            db: state.db.clone(),
            clock: state.clock.clone(),
        })
    }
}

impl Context for RequestContext {
    fn db(&self) -> &Pool<MySql> {
        &self.db
    }

    fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }
}

pub async fn serve(settings: &AppSettings) -> anyhow::Result<()> {
    let state = init::initialize_state(settings).await?;
    let app = router().with_state(state);

    let addr = SocketAddr::new(settings.app_host, settings.app_port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Listening for tracker requests");
    axum::serve(listener, app).await?;
    Ok(())
}
