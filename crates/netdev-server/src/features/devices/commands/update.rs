//! Update device command
//!
//! Replaces every mutable field of an existing device. An omitted status
//! resets the device to `ACTIVE`.

use mediator::Request;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, ServerResult};
use crate::features::devices::lifecycle;
use crate::features::devices::types::DeviceInput;
use crate::models::{timestamp_now, Device};
use crate::store::SharedStore;

/// Command to overwrite an existing device
///
/// The `id` comes from the request path, never from the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDeviceCommand {
    #[serde(skip)]
    pub id: Uuid,
    #[serde(flatten)]
    pub input: DeviceInput,
}

impl Request<ServerResult<Device>> for UpdateDeviceCommand {}

impl crate::cqrs::middleware::Command for UpdateDeviceCommand {}

/// Handles the update device command
///
/// Records UPDATED and, when the status changed, a STATUS_CHANGED entry
/// after it. Both are written with the device in one transaction.
///
/// # Errors
///
/// - `Validation` - one or more fields are invalid
/// - `NotFound` - no device with this id
/// - `Internal` - store failure
#[tracing::instrument(skip(store, command), fields(device_id = %command.id))]
pub async fn handle(store: SharedStore, command: UpdateDeviceCommand) -> ServerResult<Device> {
    let draft = command.input.validate()?;

    let existing = store
        .find_device(command.id)
        .await?
        .ok_or_else(|| AppError::device_not_found(command.id))?;

    let (device, change) = lifecycle::plan_update(&existing, draft, timestamp_now());
    store.apply(change).await?;

    tracing::info!(
        device_id = %device.id,
        old_status = %existing.status,
        new_status = %device.status,
        "Device updated"
    );
    Ok(device)
}
