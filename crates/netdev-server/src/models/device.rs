//! Device model

use chrono::{DateTime, SubsecRound, Utc};
use netdev_common::{DeviceStatus, DeviceType};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length of a device name, in characters
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum length of an IP address (fits a full IPv6 textual form)
pub const MAX_IP_ADDRESS_LENGTH: usize = 45;

/// Maximum length of a location
pub const MAX_LOCATION_LENGTH: usize = 200;

/// Current time at the precision the database keeps
///
/// `TIMESTAMPTZ` stores microseconds, so anything stamped with a finer clock
/// would not read back equal.
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// A managed network device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub status: DeviceStatus,
    pub ip_address: Option<String>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated mutable fields of a device
///
/// Produced by request validation; a draft is always within the field limits
/// above.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDraft {
    pub name: String,
    pub device_type: DeviceType,
    pub status: DeviceStatus,
    pub ip_address: Option<String>,
    pub location: Option<String>,
}

impl Device {
    /// A brand new device; both timestamps are `now`
    pub fn create(draft: DeviceDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: draft.name,
            device_type: draft.device_type,
            status: draft.status,
            ip_address: draft.ip_address,
            location: draft.location,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite every mutable field, keeping identity and creation time
    pub fn apply_draft(&self, draft: DeviceDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: self.id,
            name: draft.name,
            device_type: draft.device_type,
            status: draft.status,
            ip_address: draft.ip_address,
            location: draft.location,
            created_at: self.created_at,
            updated_at: now,
        }
    }

    pub fn with_status(&self, status: DeviceStatus, now: DateTime<Utc>) -> Self {
        Self {
            status,
            updated_at: now,
            ..self.clone()
        }
    }
}
