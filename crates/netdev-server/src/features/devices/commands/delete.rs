//! Delete device command

use mediator::Request;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, ServerResult};
use crate::features::devices::lifecycle;
use crate::store::SharedStore;

/// Command to remove a device
///
/// The device's audit history is kept; only the live link from each entry to
/// the device is cleared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteDeviceCommand {
    pub id: Uuid,
}

impl Request<ServerResult<()>> for DeleteDeviceCommand {}

impl crate::cqrs::middleware::Command for DeleteDeviceCommand {}

/// Records DELETED while the device still exists, then removes it
#[tracing::instrument(skip(store), fields(device_id = %command.id))]
pub async fn handle(store: SharedStore, command: DeleteDeviceCommand) -> ServerResult<()> {
    let existing = store
        .find_device(command.id)
        .await?
        .ok_or_else(|| AppError::device_not_found(command.id))?;

    store.apply(lifecycle::plan_delete(&existing)).await?;

    tracing::info!(device_id = %existing.id, name = %existing.name, "Device deleted");
    Ok(())
}
