//! Closed enumerations shared by the server and its clients
//!
//! All three enums serialize as SCREAMING_SNAKE_CASE strings, which is also
//! the representation stored in the database. Parsing is case-insensitive so
//! that query strings like `?status=active` work.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CommonError;

// ============================================================================
// Device Type
// ============================================================================

/// Kind of managed network asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceType {
    Router,
    Switch,
    Server,
    AccessPoint,
    Firewall,
    Other,
}

impl DeviceType {
    /// Every variant, in declaration order
    pub const ALL: [DeviceType; 6] = [
        DeviceType::Router,
        DeviceType::Switch,
        DeviceType::Server,
        DeviceType::AccessPoint,
        DeviceType::Firewall,
        DeviceType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Router => "ROUTER",
            Self::Switch => "SWITCH",
            Self::Server => "SERVER",
            Self::AccessPoint => "ACCESS_POINT",
            Self::Firewall => "FIREWALL",
            Self::Other => "OTHER",
        }
    }

    fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|t| t.as_str()).collect()
    }
}

impl std::fmt::Display for DeviceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DeviceType {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| CommonError::unknown_variant("device type", s, &Self::names()))
    }
}

// ============================================================================
// Device Status
// ============================================================================

/// Operational status of a device
///
/// Any status may move to any other; transitions are logged, not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceStatus {
    #[default]
    Active,
    Inactive,
    Maintenance,
    Decommissioned,
}

impl DeviceStatus {
    /// Every variant, in declaration order
    pub const ALL: [DeviceStatus; 4] = [
        DeviceStatus::Active,
        DeviceStatus::Inactive,
        DeviceStatus::Maintenance,
        DeviceStatus::Decommissioned,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Maintenance => "MAINTENANCE",
            Self::Decommissioned => "DECOMMISSIONED",
        }
    }

    fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|s| s.as_str()).collect()
    }
}

impl std::fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DeviceStatus {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| CommonError::unknown_variant("device status", s, &Self::names()))
    }
}

// ============================================================================
// Audit Action
// ============================================================================

/// What happened to a device, as recorded in its audit trail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    Created,
    Updated,
    StatusChanged,
    Deleted,
}

impl AuditAction {
    pub const ALL: [AuditAction; 4] = [
        AuditAction::Created,
        AuditAction::Updated,
        AuditAction::StatusChanged,
        AuditAction::Deleted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Updated => "UPDATED",
            Self::StatusChanged => "STATUS_CHANGED",
            Self::Deleted => "DELETED",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AuditAction {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        Self::ALL.into_iter().find(|a| a.as_str() == wanted).ok_or_else(|| {
            let names: Vec<&str> = Self::ALL.iter().map(|a| a.as_str()).collect();
            CommonError::unknown_variant("audit action", s, &names)
        })
    }
}
