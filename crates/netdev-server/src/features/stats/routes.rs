//! Statistics routes
//!
//! - `GET /api/v1/stats` - totals, counts by type and status, recent activity

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use super::queries::GetStatsQuery;
use crate::api::response::ApiResponse;
use crate::error::ServerResult;
use crate::store::SharedStore;

pub fn stats_routes() -> Router<SharedStore> {
    Router::new().route("/", get(get_stats))
}

#[tracing::instrument(skip(store))]
async fn get_stats(State(store): State<SharedStore>) -> ServerResult<Response> {
    let stats = super::queries::get_stats::handle(store, GetStatsQuery {}).await?;
    tracing::debug!(total = stats.total, "Stats computed");
    Ok(ApiResponse::success(stats).into_response())
}
