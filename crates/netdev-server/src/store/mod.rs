//! Record store for devices and their audit trail
//!
//! The lifecycle never talks to a database directly. It plans a
//! [`DeviceChange`] (one device write plus the audit entries describing it)
//! and hands it to a [`DeviceStore`], which applies the whole change
//! atomically. Two backends exist:
//!
//! - [`PgDeviceStore`]: PostgreSQL through sqlx, one transaction per change
//! - [`MemoryDeviceStore`]: a process-local store behind a single `RwLock`
//!
//! # Ordering
//!
//! For inserts and replacements the device row is written first and the audit
//! entries after it. For removals the entries are appended first, while the
//! device still exists, and the device is deleted last; deleting clears
//! `device_id` on all of the device's entries.

use async_trait::async_trait;
use netdev_common::{DeviceStatus, DeviceType};
use std::sync::Arc;
use uuid::Uuid;

use crate::audit::{AuditEntry, AuditIntent};
use crate::models::Device;

pub mod error;
pub mod memory;
pub mod postgres;
pub mod query;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryDeviceStore;
pub use postgres::PgDeviceStore;
pub use query::{DeviceFilter, DeviceQuery, DeviceSort, SortDirection, SortField};

/// The device row part of a change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceWrite {
    /// Store a new device
    Insert(Device),
    /// Overwrite an existing device with the same id
    Replace(Device),
    /// Delete the device with this id
    Remove(Uuid),
}

impl DeviceWrite {
    pub fn device_id(&self) -> Uuid {
        match self {
            Self::Insert(device) | Self::Replace(device) => device.id,
            Self::Remove(id) => *id,
        }
    }
}

/// A device write together with the audit entries that describe it,
/// applied as one unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceChange {
    pub write: DeviceWrite,
    /// Appended in order
    pub audit: Vec<AuditIntent>,
}

/// Durable storage for devices and audit entries
///
/// Count-by reads return only the groups that exist; callers fill in zeros.
/// Audit reads are newest first, ties broken by append order.
#[async_trait]
pub trait DeviceStore: Send + Sync {
    /// Cheap round trip used by the health endpoint
    async fn ping(&self) -> StoreResult<()>;

    async fn find_device(&self, id: Uuid) -> StoreResult<Option<Device>>;

    /// One page of matching devices plus the total number of matches
    async fn list_devices(&self, query: &DeviceQuery) -> StoreResult<(Vec<Device>, i64)>;

    async fn count_devices(&self) -> StoreResult<i64>;

    async fn count_by_type(&self) -> StoreResult<Vec<(DeviceType, i64)>>;

    async fn count_by_status(&self) -> StoreResult<Vec<(DeviceStatus, i64)>>;

    /// Every entry whose subject is `device_id`, including after deletion
    async fn logs_for_device(&self, device_id: Uuid) -> StoreResult<Vec<AuditEntry>>;

    async fn recent_logs(&self, limit: i64) -> StoreResult<Vec<AuditEntry>>;

    /// Apply a change atomically
    ///
    /// Fails with [`StoreError::NotFound`] when a replace or remove targets a
    /// missing device, and with [`StoreError::Conflict`] when an insert reuses
    /// an id. Nothing is written on failure.
    async fn apply(&self, change: DeviceChange) -> StoreResult<()>;
}

/// Store handle shared by handlers
pub type SharedStore = Arc<dyn DeviceStore>;
