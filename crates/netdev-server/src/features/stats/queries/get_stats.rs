//! Dashboard statistics query
//!
//! Four independent reads run concurrently: total, count by type, count by
//! status and the recent activity feed. There is no shared snapshot between
//! them and nothing is cached. If any read fails the whole query fails.

use mediator::Request;
use netdev_common::{DeviceStatus, DeviceType};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::audit::{AuditEntry, DEFAULT_RECENT_LIMIT};
use crate::error::ServerResult;
use crate::store::SharedStore;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetStatsQuery {}

impl Request<ServerResult<DeviceStats>> for GetStatsQuery {}

impl crate::cqrs::middleware::Query for GetStatsQuery {}

/// Counts keyed by an enumeration, one entry per variant in declaration
/// order, zero counts included
///
/// Serializes as a JSON object: `{"ROUTER": 2, "SWITCH": 0, ...}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountBy<K> {
    counts: Vec<(K, i64)>,
}

impl<K: Copy + PartialEq> CountBy<K> {
    /// Fill `sparse` (groups that exist) out to every key in `all`
    pub fn complete(all: &[K], sparse: &[(K, i64)]) -> Self {
        let counts = all
            .iter()
            .map(|key| {
                let n = sparse
                    .iter()
                    .find(|(k, _)| k == key)
                    .map_or(0, |(_, n)| *n);
                (*key, n)
            })
            .collect();
        Self { counts }
    }

    pub fn get(&self, key: K) -> i64 {
        self.counts
            .iter()
            .find(|(k, _)| *k == key)
            .map_or(0, |(_, n)| *n)
    }

    pub fn sum(&self) -> i64 {
        self.counts.iter().map(|(_, n)| n).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(K, i64)> {
        self.counts.iter()
    }
}

impl<K: Serialize> Serialize for CountBy<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.counts.len()))?;
        for (key, count) in &self.counts {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DeviceStats {
    pub total: i64,
    pub by_type: CountBy<DeviceType>,
    pub by_status: CountBy<DeviceStatus>,
    pub recent_activity: Vec<AuditEntry>,
}

#[tracing::instrument(skip(store))]
pub async fn handle(store: SharedStore, _query: GetStatsQuery) -> ServerResult<DeviceStats> {
    let (total, by_type, by_status, recent_activity) = tokio::try_join!(
        store.count_devices(),
        store.count_by_type(),
        store.count_by_status(),
        store.recent_logs(DEFAULT_RECENT_LIMIT),
    )?;

    Ok(DeviceStats {
        total,
        by_type: CountBy::complete(&DeviceType::ALL, &by_type),
        by_status: CountBy::complete(&DeviceStatus::ALL, &by_status),
        recent_activity,
    })
}
