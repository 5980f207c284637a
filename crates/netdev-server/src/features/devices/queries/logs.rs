//! Device history query

use mediator::Request;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::audit::AuditEntry;
use crate::error::ServerResult;
use crate::store::SharedStore;

/// History of one device, newest first
///
/// Works for deleted devices too; an id with no history yields an empty list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceLogsQuery {
    pub id: Uuid,
}

impl Request<ServerResult<Vec<AuditEntry>>> for DeviceLogsQuery {}

impl crate::cqrs::middleware::Query for DeviceLogsQuery {}

#[tracing::instrument(skip(store), fields(device_id = %query.id))]
pub async fn handle(store: SharedStore, query: DeviceLogsQuery) -> ServerResult<Vec<AuditEntry>> {
    Ok(store.logs_for_device(query.id).await?)
}
