//! Update device status command

use mediator::Request;
use netdev_common::DeviceStatus;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, ServerResult};
use crate::features::devices::lifecycle;
use crate::features::shared::validation::{parse_enum, ValidationErrors};
use crate::models::{timestamp_now, Device};
use crate::store::SharedStore;

/// Command to move a device to another status
///
/// Body: `{"status": "maintenance"}` (case-insensitive).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDeviceStatusCommand {
    #[serde(skip)]
    pub id: Uuid,
    #[serde(default)]
    pub status: Option<String>,
}

impl Request<ServerResult<Device>> for UpdateDeviceStatusCommand {}

impl crate::cqrs::middleware::Command for UpdateDeviceStatusCommand {}

impl UpdateDeviceStatusCommand {
    pub fn validate(&self) -> Result<DeviceStatus, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let status = parse_enum(&mut errors, "status", self.status.as_deref(), true);
        match status {
            Some(status) => Ok(status),
            None => Err(errors),
        }
    }
}

/// Handles the status command
///
/// Always records exactly one STATUS_CHANGED entry, also when the new status
/// equals the current one.
#[tracing::instrument(skip(store, command), fields(device_id = %command.id))]
pub async fn handle(
    store: SharedStore,
    command: UpdateDeviceStatusCommand,
) -> ServerResult<Device> {
    let status = command.validate()?;

    let existing = store
        .find_device(command.id)
        .await?
        .ok_or_else(|| AppError::device_not_found(command.id))?;

    let (device, change) = lifecycle::plan_status_change(&existing, status, timestamp_now());
    store.apply(change).await?;

    tracing::info!(
        device_id = %device.id,
        old_status = %existing.status,
        new_status = %device.status,
        "Device status changed"
    );
    Ok(device)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::{memory_store, TestDevice};
    use netdev_common::AuditAction;

    fn command(id: Uuid, status: Option<&str>) -> UpdateDeviceStatusCommand {
        UpdateDeviceStatusCommand {
            id,
            status: status.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_status_change_is_case_insensitive() {
        let store = memory_store();
        let device = TestDevice::new("Router-1").insert(&store).await;

        let updated = handle(store.clone(), command(device.id, Some("maintenance")))
            .await
            .unwrap();
        assert_eq!(updated.status, DeviceStatus::Maintenance);

        let logs = store.logs_for_device(device.id).await.unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].action, AuditAction::StatusChanged);
    }

    #[tokio::test]
    async fn test_same_status_still_logs() {
        let store = memory_store();
        let device = TestDevice::new("Router-1").insert(&store).await;

        handle(store.clone(), command(device.id, Some("ACTIVE")))
            .await
            .unwrap();
        let logs = store.logs_for_device(device.id).await.unwrap();
        assert_eq!(logs[0].description, "Status changed from ACTIVE to ACTIVE");
    }

    #[tokio::test]
    async fn test_missing_or_unknown_status() {
        let store = memory_store();
        let device = TestDevice::new("Router-1").insert(&store).await;

        let missing = handle(store.clone(), command(device.id, None)).await.unwrap_err();
        assert!(matches!(missing, AppError::Validation(ref e) if e.contains("status")));

        let unknown = handle(store.clone(), command(device.id, Some("ASLEEP")))
            .await
            .unwrap_err();
        assert!(matches!(unknown, AppError::Validation(_)));

        assert_eq!(store.logs_for_device(device.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_device() {
        let store = memory_store();
        let err = handle(store, command(Uuid::new_v4(), Some("INACTIVE")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
