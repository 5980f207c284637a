//! Activity feed routes
//!
//! - `GET /api/v1/logs?limit=10` - newest audit entries across all devices

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use super::queries::RecentLogsQuery;
use crate::api::extract::ApiQuery;
use crate::api::response::ApiResponse;
use crate::error::ServerResult;
use crate::store::SharedStore;

pub fn audit_logs_routes() -> Router<SharedStore> {
    Router::new().route("/", get(recent_logs))
}

#[tracing::instrument(skip(store))]
async fn recent_logs(
    State(store): State<SharedStore>,
    ApiQuery(query): ApiQuery<RecentLogsQuery>,
) -> ServerResult<Response> {
    let logs = super::queries::recent::handle(store, query).await?;
    Ok(ApiResponse::success(logs).into_response())
}
