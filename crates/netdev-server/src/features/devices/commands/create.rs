//! Create device command

use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::error::ServerResult;
use crate::features::devices::lifecycle;
use crate::features::devices::types::DeviceInput;
use crate::models::{timestamp_now, Device};
use crate::store::SharedStore;

/// Command to register a new device
///
/// # Examples
///
/// ```rust,ignore
/// let command = CreateDeviceCommand {
///     input: DeviceInput {
///         name: Some("Router-1".to_string()),
///         device_type: Some("ROUTER".to_string()),
///         ..Default::default()
///     },
/// };
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDeviceCommand {
    #[serde(flatten)]
    pub input: DeviceInput,
}

impl Request<ServerResult<Device>> for CreateDeviceCommand {}

impl crate::cqrs::middleware::Command for CreateDeviceCommand {}

/// Validates the input, stores the device and records a CREATED entry
/// in the same transaction.
///
/// # Errors
///
/// - `Validation` - one or more fields are invalid (all are reported)
/// - `Conflict` - the store rejected the insert
/// - `Internal` - store failure
#[tracing::instrument(skip(store, command))]
pub async fn handle(store: SharedStore, command: CreateDeviceCommand) -> ServerResult<Device> {
    let draft = command.input.validate()?;
    let (device, change) = lifecycle::plan_create(draft, timestamp_now());

    store.apply(change).await?;

    tracing::info!(device_id = %device.id, name = %device.name, "Device created");
    Ok(device)
}
