//! Read-side query descriptions shared by every store backend

use netdev_common::{DeviceStatus, DeviceType};
use std::cmp::Ordering;
use std::str::FromStr;

use crate::models::Device;

/// Which devices a list read selects
///
/// A free-text search replaces the status/type filters instead of combining
/// with them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeviceFilter {
    #[default]
    All,
    Status(DeviceStatus),
    Type(DeviceType),
    StatusAndType(DeviceStatus, DeviceType),
    /// Trimmed, non-empty search text
    Search(String),
}

impl DeviceFilter {
    /// Pick the effective filter: search text, then both fields, then either
    /// field, then everything
    pub fn resolve(
        status: Option<DeviceStatus>,
        device_type: Option<DeviceType>,
        q: Option<&str>,
    ) -> Self {
        if let Some(text) = q.map(str::trim).filter(|text| !text.is_empty()) {
            return Self::Search(text.to_string());
        }
        match (status, device_type) {
            (Some(status), Some(device_type)) => Self::StatusAndType(status, device_type),
            (Some(status), None) => Self::Status(status),
            (None, Some(device_type)) => Self::Type(device_type),
            (None, None) => Self::All,
        }
    }

    pub fn status(&self) -> Option<DeviceStatus> {
        match self {
            Self::Status(status) | Self::StatusAndType(status, _) => Some(*status),
            _ => None,
        }
    }

    pub fn device_type(&self) -> Option<DeviceType> {
        match self {
            Self::Type(device_type) | Self::StatusAndType(_, device_type) => Some(*device_type),
            _ => None,
        }
    }

    pub fn search(&self) -> Option<&str> {
        match self {
            Self::Search(text) => Some(text),
            _ => None,
        }
    }

    /// In-process evaluation of the filter
    pub fn matches(&self, device: &Device) -> bool {
        match self {
            Self::All => true,
            Self::Status(status) => device.status == *status,
            Self::Type(device_type) => device.device_type == *device_type,
            Self::StatusAndType(status, device_type) => {
                device.status == *status && device.device_type == *device_type
            },
            Self::Search(text) => {
                let needle = text.to_lowercase();
                let hit = |value: Option<&str>| {
                    value.is_some_and(|value| value.to_lowercase().contains(&needle))
                };
                hit(Some(&device.name))
                    || hit(device.ip_address.as_deref())
                    || hit(device.location.as_deref())
            },
        }
    }
}

/// Sortable device columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Name,
    Type,
    Status,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    pub const NAMES: [&'static str; 5] = ["name", "type", "status", "created_at", "updated_at"];

    fn compare(self, a: &Device, b: &Device) -> Ordering {
        match self {
            Self::Name => a.name.cmp(&b.name),
            Self::Type => a.device_type.as_str().cmp(b.device_type.as_str()),
            Self::Status => a.status.as_str().cmp(b.status.as_str()),
            Self::CreatedAt => a.created_at.cmp(&b.created_at),
            Self::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        }
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "type" | "device_type" => Ok(Self::Type),
            "status" => Ok(Self::Status),
            "created_at" => Ok(Self::CreatedAt),
            "updated_at" => Ok(Self::UpdatedAt),
            _ => Err(format!(
                "unknown sort field '{}', expected one of: {}",
                s.trim(),
                Self::NAMES.join(", ")
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Sort order of a list read. Ties are always broken by id, ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceSort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl DeviceSort {
    /// Total order over devices
    pub fn compare(&self, a: &Device, b: &Device) -> Ordering {
        let by_field = match self.direction {
            SortDirection::Asc => self.field.compare(a, b),
            SortDirection::Desc => self.field.compare(b, a),
        };
        by_field.then_with(|| a.id.cmp(&b.id))
    }
}

impl FromStr for DeviceSort {
    type Err = String;

    /// Parses `field` or `field,asc|desc`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = match s.split_once(',') {
            Some((field, direction)) => (field, Some(direction)),
            None => (s, None),
        };

        let direction = match direction.map(|d| d.trim().to_ascii_lowercase()) {
            None => SortDirection::Asc,
            Some(d) if d == "asc" => SortDirection::Asc,
            Some(d) if d == "desc" => SortDirection::Desc,
            Some(d) => return Err(format!("unknown sort direction '{}', expected asc or desc", d)),
        };

        Ok(Self {
            field: field.parse()?,
            direction,
        })
    }
}

/// A complete list read: filter, order and window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceQuery {
    pub filter: DeviceFilter,
    pub sort: DeviceSort,
    pub limit: i64,
    pub offset: i64,
}

/// Escape `%`, `_` and `\` so user text is matched literally by `LIKE ... ESCAPE '\'`
pub fn like_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
