//! In-memory store backend
//!
//! Keeps everything in process memory behind one `tokio::sync::RwLock`.
//! `apply` takes the write lock for the whole change and validates before it
//! mutates, so readers see either all of a change or none of it. Used for
//! development (`storage.backend = "memory"`) and tests.

use async_trait::async_trait;
use netdev_common::{DeviceStatus, DeviceType};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::{DeviceChange, DeviceQuery, DeviceStore, DeviceWrite, StoreError, StoreResult};
use crate::audit::{AuditEntry, AuditIntent};
use crate::models::{timestamp_now, Device};

#[derive(Debug, Default)]
struct Inner {
    devices: HashMap<Uuid, Device>,
    /// Append order; the index is the sequence number
    logs: Vec<AuditEntry>,
}

impl Inner {
    fn append(&mut self, intents: Vec<AuditIntent>) {
        let now = timestamp_now();
        self.logs
            .extend(intents.into_iter().map(|intent| intent.into_entry(now)));
    }

    /// Entries newest first, ties broken by append order
    fn newest_first(&self, keep: impl Fn(&AuditEntry) -> bool) -> Vec<AuditEntry> {
        let mut entries: Vec<(usize, &AuditEntry)> =
            self.logs.iter().enumerate().filter(|(_, e)| keep(e)).collect();
        entries.sort_by(|(seq_a, a), (seq_b, b)| {
            b.created_at.cmp(&a.created_at).then_with(|| seq_b.cmp(seq_a))
        });
        entries.into_iter().map(|(_, e)| e.clone()).collect()
    }
}

/// Process-local [`DeviceStore`]
#[derive(Debug, Default)]
pub struct MemoryDeviceStore {
    inner: RwLock<Inner>,
}

impl MemoryDeviceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn count_in_order<K, I>(keys: I) -> Vec<(K, i64)>
where
    K: PartialEq + Copy,
    I: Iterator<Item = K>,
{
    let mut counts: Vec<(K, i64)> = Vec::new();
    for key in keys {
        match counts.iter_mut().find(|(k, _)| *k == key) {
            Some((_, n)) => *n += 1,
            None => counts.push((key, 1)),
        }
    }
    counts
}

#[async_trait]
impl DeviceStore for MemoryDeviceStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn find_device(&self, id: Uuid) -> StoreResult<Option<Device>> {
        Ok(self.inner.read().await.devices.get(&id).cloned())
    }

    async fn list_devices(&self, query: &DeviceQuery) -> StoreResult<(Vec<Device>, i64)> {
        let inner = self.inner.read().await;

        let mut matching: Vec<&Device> = inner
            .devices
            .values()
            .filter(|device| query.filter.matches(device))
            .collect();
        matching.sort_by(|a, b| query.sort.compare(a, b));

        let total = matching.len() as i64;
        let offset = usize::try_from(query.offset.max(0)).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.limit.max(0)).unwrap_or(usize::MAX);
        let page = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        Ok((page, total))
    }

    async fn count_devices(&self) -> StoreResult<i64> {
        Ok(self.inner.read().await.devices.len() as i64)
    }

    async fn count_by_type(&self) -> StoreResult<Vec<(DeviceType, i64)>> {
        let inner = self.inner.read().await;
        Ok(count_in_order(inner.devices.values().map(|d| d.device_type)))
    }

    async fn count_by_status(&self) -> StoreResult<Vec<(DeviceStatus, i64)>> {
        let inner = self.inner.read().await;
        Ok(count_in_order(inner.devices.values().map(|d| d.status)))
    }

    async fn logs_for_device(&self, device_id: Uuid) -> StoreResult<Vec<AuditEntry>> {
        let inner = self.inner.read().await;
        Ok(inner.newest_first(move |entry| entry.subject_id == device_id))
    }

    async fn recent_logs(&self, limit: i64) -> StoreResult<Vec<AuditEntry>> {
        let inner = self.inner.read().await;
        let limit = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
        let mut entries = inner.newest_first(|_| true);
        entries.truncate(limit);
        Ok(entries)
    }

    async fn apply(&self, change: DeviceChange) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let DeviceChange { write, audit } = change;
        let device_id = write.device_id();

        match write {
            DeviceWrite::Insert(device) => {
                if inner.devices.contains_key(&device.id) {
                    return Err(StoreError::Conflict(format!(
                        "device id '{}' already exists",
                        device.id
                    )));
                }
                inner.devices.insert(device.id, device);
                inner.append(audit);
            },
            DeviceWrite::Replace(device) => {
                let slot = inner
                    .devices
                    .get_mut(&device.id)
                    .ok_or(StoreError::NotFound(device.id))?;
                *slot = device;
                inner.append(audit);
            },
            DeviceWrite::Remove(id) => {
                if !inner.devices.contains_key(&id) {
                    return Err(StoreError::NotFound(id));
                }
                inner.append(audit);
                inner.devices.remove(&id);
                for entry in inner.logs.iter_mut().filter(|e| e.device_id == Some(id)) {
                    entry.device_id = None;
                }
            },
        }

        debug!(device_id = %device_id, "Applied device change");
        Ok(())
    }
}
