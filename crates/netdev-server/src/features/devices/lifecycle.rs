//! Device lifecycle planning
//!
//! Each lifecycle operation is decided here as a pure function of the current
//! device (if any), the validated request and the clock. The result is the
//! device the caller gets back plus the [`DeviceChange`] the store must apply.
//! Keeping this free of I/O is what lets the "which audit entries, in which
//! order" rules be unit tested directly.

use chrono::{DateTime, Utc};
use netdev_common::DeviceStatus;

use crate::audit::AuditIntent;
use crate::models::{Device, DeviceDraft};
use crate::store::{DeviceChange, DeviceWrite};

/// New device, one CREATED entry
pub fn plan_create(draft: DeviceDraft, now: DateTime<Utc>) -> (Device, DeviceChange) {
    let device = Device::create(draft, now);
    let change = DeviceChange {
        write: DeviceWrite::Insert(device.clone()),
        audit: vec![AuditIntent::created(&device)],
    };
    (device, change)
}

/// Full overwrite: UPDATED, then STATUS_CHANGED when the status moved
pub fn plan_update(
    existing: &Device,
    draft: DeviceDraft,
    now: DateTime<Utc>,
) -> (Device, DeviceChange) {
    let previous_status = existing.status;
    let device = existing.apply_draft(draft, now);

    let mut audit = vec![AuditIntent::updated(&device)];
    if device.status != previous_status {
        audit.push(AuditIntent::status_changed(&device, previous_status, device.status));
    }

    let change = DeviceChange {
        write: DeviceWrite::Replace(device.clone()),
        audit,
    };
    (device, change)
}

/// Status only: always exactly one STATUS_CHANGED, even for a no-op
pub fn plan_status_change(
    existing: &Device,
    status: DeviceStatus,
    now: DateTime<Utc>,
) -> (Device, DeviceChange) {
    let device = existing.with_status(status, now);
    let change = DeviceChange {
        write: DeviceWrite::Replace(device.clone()),
        audit: vec![AuditIntent::status_changed(&device, existing.status, status)],
    };
    (device, change)
}

/// DELETED is recorded against the device before it is removed
pub fn plan_delete(existing: &Device) -> DeviceChange {
    DeviceChange {
        write: DeviceWrite::Remove(existing.id),
        audit: vec![AuditIntent::deleted(existing)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netdev_common::{AuditAction, DeviceType};

    fn draft(status: DeviceStatus) -> DeviceDraft {
        DeviceDraft {
            name: "edge-fw".to_string(),
            device_type: DeviceType::Firewall,
            status,
            ip_address: Some("192.168.1.1".to_string()),
            location: None,
        }
    }

    fn actions(change: &DeviceChange) -> Vec<AuditAction> {
        change.audit.iter().map(|intent| intent.action).collect()
    }

    #[test]
    fn test_create_logs_created() {
        let now = Utc::now();
        let (device, change) = plan_create(draft(DeviceStatus::Active), now);
        assert_eq!(device.created_at, now);
        assert_eq!(device.updated_at, now);
        assert_eq!(change.write, DeviceWrite::Insert(device.clone()));
        assert_eq!(actions(&change), vec![AuditAction::Created]);
        assert_eq!(change.audit[0].description, "Device 'edge-fw' created");
    }

    #[test]
    fn test_update_with_new_status_logs_both_in_order() {
        let (existing, _) = plan_create(draft(DeviceStatus::Active), Utc::now());
        let (device, change) =
            plan_update(&existing, draft(DeviceStatus::Maintenance), Utc::now());

        assert_eq!(device.status, DeviceStatus::Maintenance);
        assert_eq!(
            actions(&change),
            vec![AuditAction::Updated, AuditAction::StatusChanged]
        );
        assert_eq!(
            change.audit[1].description,
            "Status changed from ACTIVE to MAINTENANCE"
        );
    }

    #[test]
    fn test_update_with_same_status_logs_once() {
        let (existing, _) = plan_create(draft(DeviceStatus::Inactive), Utc::now());
        let (_, change) = plan_update(&existing, draft(DeviceStatus::Inactive), Utc::now());
        assert_eq!(actions(&change), vec![AuditAction::Updated]);
    }

    #[test]
    fn test_update_keeps_creation_time() {
        let created = Utc::now();
        let (existing, _) = plan_create(draft(DeviceStatus::Active), created);
        let later = created + chrono::Duration::minutes(1);
        let (device, _) = plan_update(&existing, draft(DeviceStatus::Active), later);
        assert_eq!(device.created_at, created);
        assert_eq!(device.updated_at, later);
        assert_eq!(device.id, existing.id);
    }

    #[test]
    fn test_status_change_always_logs() {
        let (existing, _) = plan_create(draft(DeviceStatus::Active), Utc::now());
        let (device, change) = plan_status_change(&existing, DeviceStatus::Active, Utc::now());
        assert_eq!(device.status, DeviceStatus::Active);
        assert_eq!(actions(&change), vec![AuditAction::StatusChanged]);
        assert_eq!(change.audit[0].description, "Status changed from ACTIVE to ACTIVE");
    }

    #[test]
    fn test_delete_logs_deleted_for_the_device() {
        let (existing, _) = plan_create(draft(DeviceStatus::Active), Utc::now());
        let change = plan_delete(&existing);
        assert_eq!(change.write, DeviceWrite::Remove(existing.id));
        assert_eq!(actions(&change), vec![AuditAction::Deleted]);
        assert_eq!(change.audit[0].subject_id, existing.id);
        assert_eq!(change.audit[0].description, "Device 'edge-fw' deleted");
    }
}
