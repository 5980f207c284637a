//! PostgreSQL store backend
//!
//! Uses runtime-checked `sqlx::query_as` so the crate builds without a live
//! database. Enumerations are stored as their SCREAMING_SNAKE_CASE text.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use netdev_common::{DeviceStatus, DeviceType};
use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;
use uuid::Uuid;

use super::query::{like_pattern, SortDirection, SortField};
use super::{DeviceChange, DeviceQuery, DeviceStore, DeviceWrite, StoreError, StoreResult};
use crate::audit::{AuditEntry, AuditIntent};
use crate::models::{timestamp_now, Device};

const DEVICE_COLUMNS: &str =
    "id, name, device_type, status, ip_address, location, created_at, updated_at";

const LOG_COLUMNS: &str = "id, device_id, subject_id, device_name, action, description, created_at";

/// `$1` status, `$2` type, `$3` search pattern; each may be NULL
const DEVICE_FILTER: &str = r#"
    ($1::TEXT IS NULL OR status = $1)
    AND ($2::TEXT IS NULL OR device_type = $2)
    AND ($3::TEXT IS NULL
         OR LOWER(name) LIKE $3 ESCAPE '\'
         OR LOWER(COALESCE(ip_address, '')) LIKE $3 ESCAPE '\'
         OR LOWER(COALESCE(location, '')) LIKE $3 ESCAPE '\')
"#;

#[derive(Debug, sqlx::FromRow)]
struct DeviceRow {
    id: Uuid,
    name: String,
    device_type: String,
    status: String,
    ip_address: Option<String>,
    location: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<DeviceRow> for Device {
    type Error = StoreError;

    fn try_from(row: DeviceRow) -> Result<Self, Self::Error> {
        Ok(Device {
            id: row.id,
            name: row.name,
            device_type: row.device_type.parse()?,
            status: row.status.parse()?,
            ip_address: row.ip_address,
            location: row.location,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct LogRow {
    id: Uuid,
    device_id: Option<Uuid>,
    subject_id: Uuid,
    device_name: String,
    action: String,
    description: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<LogRow> for AuditEntry {
    type Error = StoreError;

    fn try_from(row: LogRow) -> Result<Self, Self::Error> {
        Ok(AuditEntry {
            id: row.id,
            device_id: row.device_id,
            subject_id: row.subject_id,
            device_name: row.device_name,
            action: row.action.parse()?,
            description: row.description,
            created_at: row.created_at,
        })
    }
}

fn order_by(field: SortField, direction: SortDirection) -> String {
    // Byte-wise collation keeps ordering identical to the in-memory backend
    let column = match field {
        SortField::Name => r#"name COLLATE "C""#,
        SortField::Type => r#"device_type COLLATE "C""#,
        SortField::Status => r#"status COLLATE "C""#,
        SortField::CreatedAt => "created_at",
        SortField::UpdatedAt => "updated_at",
    };
    let direction = match direction {
        SortDirection::Asc => "ASC",
        SortDirection::Desc => "DESC",
    };
    format!("{} {}, id ASC", column, direction)
}

/// [`DeviceStore`] backed by PostgreSQL
#[derive(Debug, Clone)]
pub struct PgDeviceStore {
    pool: PgPool,
}

impl PgDeviceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn count_grouped(&self, column: &'static str) -> StoreResult<Vec<(String, i64)>> {
        let sql = format!("SELECT {column}, COUNT(*) FROM devices GROUP BY {column}");
        Ok(sqlx::query_as::<_, (String, i64)>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }
}

async fn insert_device(tx: &mut Transaction<'_, Postgres>, device: &Device) -> StoreResult<()> {
    sqlx::query(
        r#"
        INSERT INTO devices (id, name, device_type, status, ip_address, location, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(device.id)
    .bind(&device.name)
    .bind(device.device_type.as_str())
    .bind(device.status.as_str())
    .bind(&device.ip_address)
    .bind(&device.location)
    .bind(device.created_at)
    .bind(device.updated_at)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

async fn replace_device(tx: &mut Transaction<'_, Postgres>, device: &Device) -> StoreResult<()> {
    let result = sqlx::query(
        r#"
        UPDATE devices
        SET name = $2, device_type = $3, status = $4, ip_address = $5, location = $6,
            updated_at = $7
        WHERE id = $1
        "#,
    )
    .bind(device.id)
    .bind(&device.name)
    .bind(device.device_type.as_str())
    .bind(device.status.as_str())
    .bind(&device.ip_address)
    .bind(&device.location)
    .bind(device.updated_at)
    .execute(&mut **tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound(device.id));
    }
    Ok(())
}

/// Row-lock the device so the audit appends and the delete see the same row
async fn lock_device(tx: &mut Transaction<'_, Postgres>, id: Uuid) -> StoreResult<()> {
    sqlx::query("SELECT id FROM devices WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?
        .map(|_| ())
        .ok_or(StoreError::NotFound(id))
}

async fn delete_device(tx: &mut Transaction<'_, Postgres>, id: Uuid) -> StoreResult<()> {
    let result = sqlx::query("DELETE FROM devices WHERE id = $1")
        .bind(id)
        .execute(&mut **tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound(id));
    }
    Ok(())
}

async fn append_entries(
    tx: &mut Transaction<'_, Postgres>,
    intents: Vec<AuditIntent>,
) -> StoreResult<()> {
    let now = timestamp_now();
    for intent in intents {
        let entry = intent.into_entry(now);
        sqlx::query(
            r#"
            INSERT INTO device_logs (id, device_id, subject_id, device_name, action, description, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(entry.id)
        .bind(entry.device_id)
        .bind(entry.subject_id)
        .bind(&entry.device_name)
        .bind(entry.action.as_str())
        .bind(&entry.description)
        .bind(entry.created_at)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

#[async_trait]
impl DeviceStore for PgDeviceStore {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn find_device(&self, id: Uuid) -> StoreResult<Option<Device>> {
        let sql = format!("SELECT {DEVICE_COLUMNS} FROM devices WHERE id = $1");
        sqlx::query_as::<_, DeviceRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Device::try_from)
            .transpose()
    }

    async fn list_devices(&self, query: &DeviceQuery) -> StoreResult<(Vec<Device>, i64)> {
        let status = query.filter.status().map(|s| s.as_str());
        let device_type = query.filter.device_type().map(|t| t.as_str());
        let pattern = query.filter.search().map(like_pattern);

        let count_sql = format!("SELECT COUNT(*) FROM devices WHERE {DEVICE_FILTER}");
        let total = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(status)
            .bind(device_type)
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await?;

        let list_sql = format!(
            "SELECT {DEVICE_COLUMNS} FROM devices WHERE {DEVICE_FILTER} ORDER BY {} LIMIT $4 OFFSET $5",
            order_by(query.sort.field, query.sort.direction)
        );
        let rows = sqlx::query_as::<_, DeviceRow>(&list_sql)
            .bind(status)
            .bind(device_type)
            .bind(&pattern)
            .bind(query.limit)
            .bind(query.offset)
            .fetch_all(&self.pool)
            .await?;

        let devices = rows
            .into_iter()
            .map(Device::try_from)
            .collect::<StoreResult<Vec<_>>>()?;

        debug!(total, returned = devices.len(), "Listed devices");
        Ok((devices, total))
    }

    async fn count_devices(&self) -> StoreResult<i64> {
        Ok(sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM devices")
            .fetch_one(&self.pool)
            .await?)
    }

    async fn count_by_type(&self) -> StoreResult<Vec<(DeviceType, i64)>> {
        self.count_grouped("device_type")
            .await?
            .into_iter()
            .map(|(key, n)| -> StoreResult<(DeviceType, i64)> { Ok((key.parse()?, n)) })
            .collect()
    }

    async fn count_by_status(&self) -> StoreResult<Vec<(DeviceStatus, i64)>> {
        self.count_grouped("status")
            .await?
            .into_iter()
            .map(|(key, n)| -> StoreResult<(DeviceStatus, i64)> { Ok((key.parse()?, n)) })
            .collect()
    }

    async fn logs_for_device(&self, device_id: Uuid) -> StoreResult<Vec<AuditEntry>> {
        let sql = format!(
            "SELECT {LOG_COLUMNS} FROM device_logs WHERE subject_id = $1 ORDER BY created_at DESC, seq DESC"
        );
        sqlx::query_as::<_, LogRow>(&sql)
            .bind(device_id)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(AuditEntry::try_from)
            .collect()
    }

    async fn recent_logs(&self, limit: i64) -> StoreResult<Vec<AuditEntry>> {
        let sql = format!(
            "SELECT {LOG_COLUMNS} FROM device_logs ORDER BY created_at DESC, seq DESC LIMIT $1"
        );
        sqlx::query_as::<_, LogRow>(&sql)
            .bind(limit.max(0))
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(AuditEntry::try_from)
            .collect()
    }

    async fn apply(&self, change: DeviceChange) -> StoreResult<()> {
        let DeviceChange { write, audit } = change;
        let device_id = write.device_id();
        let mut tx = self.pool.begin().await?;

        match write {
            DeviceWrite::Insert(device) => {
                insert_device(&mut tx, &device).await?;
                append_entries(&mut tx, audit).await?;
            },
            DeviceWrite::Replace(device) => {
                replace_device(&mut tx, &device).await?;
                append_entries(&mut tx, audit).await?;
            },
            DeviceWrite::Remove(id) => {
                lock_device(&mut tx, id).await?;
                append_entries(&mut tx, audit).await?;
                delete_device(&mut tx, id).await?;
            },
        }

        tx.commit().await?;
        debug!(device_id = %device_id, "Committed device change");
        Ok(())
    }
}
