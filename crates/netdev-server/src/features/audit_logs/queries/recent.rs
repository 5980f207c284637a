//! Recent activity query

use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::audit::{AuditEntry, DEFAULT_RECENT_LIMIT, MAX_RECENT_LIMIT};
use crate::error::ServerResult;
use crate::features::shared::validation::ValidationErrors;
use crate::store::SharedStore;

/// Global activity feed across all devices, deleted ones included
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecentLogsQuery {
    /// 1-100, defaults to 10
    #[serde(default)]
    pub limit: Option<i64>,
}

impl Request<ServerResult<Vec<AuditEntry>>> for RecentLogsQuery {}

impl crate::cqrs::middleware::Query for RecentLogsQuery {}

impl RecentLogsQuery {
    pub fn validate(&self) -> Result<i64, ValidationErrors> {
        match self.limit {
            None => Ok(DEFAULT_RECENT_LIMIT),
            Some(limit) if (1..=MAX_RECENT_LIMIT).contains(&limit) => Ok(limit),
            Some(_) => Err(ValidationErrors::single(
                "limit",
                format!("must be between 1 and {}", MAX_RECENT_LIMIT),
            )),
        }
    }
}

#[tracing::instrument(skip(store))]
pub async fn handle(store: SharedStore, query: RecentLogsQuery) -> ServerResult<Vec<AuditEntry>> {
    let limit = query.validate()?;
    Ok(store.recent_logs(limit).await?)
}
