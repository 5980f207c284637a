//! Audit data models

use chrono::{DateTime, Utc};
use netdev_common::{AuditAction, DeviceStatus};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Device;

// ============================================================================
// Audit Query Constants
// ============================================================================

/// Number of entries on the dashboard activity feed
pub const DEFAULT_RECENT_LIMIT: i64 = 10;

/// Largest activity feed a caller may request
pub const MAX_RECENT_LIMIT: i64 = 100;

/// One immutable line of a device's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: Uuid,
    /// Live reference; `None` once the device has been deleted
    pub device_id: Option<Uuid>,
    /// The device this entry describes, kept after deletion
    pub subject_id: Uuid,
    /// Device name at the time of the change
    pub device_name: String,
    pub action: AuditAction,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// An entry the lifecycle wants appended, before the store assigns its id
/// and timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditIntent {
    pub subject_id: Uuid,
    pub device_name: String,
    pub action: AuditAction,
    pub description: String,
}

impl AuditIntent {
    pub fn created(device: &Device) -> Self {
        Self::new(
            device,
            AuditAction::Created,
            format!("Device '{}' created", device.name),
        )
    }

    pub fn updated(device: &Device) -> Self {
        Self::new(
            device,
            AuditAction::Updated,
            format!("Device '{}' updated", device.name),
        )
    }

    pub fn status_changed(device: &Device, from: DeviceStatus, to: DeviceStatus) -> Self {
        Self::new(
            device,
            AuditAction::StatusChanged,
            format!("Status changed from {} to {}", from, to),
        )
    }

    pub fn deleted(device: &Device) -> Self {
        Self::new(
            device,
            AuditAction::Deleted,
            format!("Device '{}' deleted", device.name),
        )
    }

    fn new(device: &Device, action: AuditAction, description: String) -> Self {
        Self {
            subject_id: device.id,
            device_name: device.name.clone(),
            action,
            description,
        }
    }

    /// Materialize the intent. `device_id` starts out equal to the subject.
    pub fn into_entry(self, created_at: DateTime<Utc>) -> AuditEntry {
        AuditEntry {
            id: Uuid::new_v4(),
            device_id: Some(self.subject_id),
            subject_id: self.subject_id,
            device_name: self.device_name,
            action: self.action,
            description: self.description,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DeviceDraft;
    use netdev_common::DeviceType;

    fn device() -> Device {
        Device::create(
            DeviceDraft {
                name: "Router-1".to_string(),
                device_type: DeviceType::Router,
                status: DeviceStatus::Active,
                ip_address: None,
                location: None,
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_descriptions() {
        let device = device();
        assert_eq!(AuditIntent::created(&device).description, "Device 'Router-1' created");
        assert_eq!(AuditIntent::updated(&device).description, "Device 'Router-1' updated");
        assert_eq!(AuditIntent::deleted(&device).description, "Device 'Router-1' deleted");
        assert_eq!(
            AuditIntent::status_changed(&device, DeviceStatus::Active, DeviceStatus::Maintenance)
                .description,
            "Status changed from ACTIVE to MAINTENANCE"
        );
    }

    #[test]
    fn test_into_entry_links_device() {
        let device = device();
        let now = Utc::now();
        let entry = AuditIntent::created(&device).into_entry(now);
        assert_eq!(entry.device_id, Some(device.id));
        assert_eq!(entry.subject_id, device.id);
        assert_eq!(entry.device_name, "Router-1");
        assert_eq!(entry.action, AuditAction::Created);
        assert_eq!(entry.created_at, now);
    }
}
