//! Get device query

use mediator::Request;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, ServerResult};
use crate::models::Device;
use crate::store::SharedStore;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetDeviceQuery {
    pub id: Uuid,
}

impl Request<ServerResult<Device>> for GetDeviceQuery {}

impl crate::cqrs::middleware::Query for GetDeviceQuery {}

#[tracing::instrument(skip(store), fields(device_id = %query.id))]
pub async fn handle(store: SharedStore, query: GetDeviceQuery) -> ServerResult<Device> {
    store
        .find_device(query.id)
        .await?
        .ok_or_else(|| AppError::device_not_found(query.id))
}
