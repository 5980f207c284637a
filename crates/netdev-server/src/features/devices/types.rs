//! Request payload shared by create and update

use netdev_common::{DeviceStatus, DeviceType};
use serde::{Deserialize, Serialize};

use crate::features::shared::validation::{
    optional_text, parse_enum, require_text, ValidationErrors,
};
use crate::models::device::{
    DeviceDraft, MAX_IP_ADDRESS_LENGTH, MAX_LOCATION_LENGTH, MAX_NAME_LENGTH,
};

/// Unvalidated device fields as sent by a client
///
/// Enumerations arrive as raw strings so that unknown values become field
/// errors instead of JSON decoding failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub device_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl DeviceInput {
    /// Check every field and collect all failures
    ///
    /// A missing status becomes `ACTIVE`. Text is trimmed; blank optional text
    /// is stored as absent.
    pub fn validate(&self) -> Result<DeviceDraft, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = require_text(&mut errors, "name", self.name.as_deref(), MAX_NAME_LENGTH);
        let device_type: Option<DeviceType> =
            parse_enum(&mut errors, "type", self.device_type.as_deref(), true);
        let status: Option<DeviceStatus> =
            parse_enum(&mut errors, "status", self.status.as_deref(), false);
        let ip_address = optional_text(
            &mut errors,
            "ip_address",
            self.ip_address.as_deref(),
            MAX_IP_ADDRESS_LENGTH,
        );
        let location = optional_text(
            &mut errors,
            "location",
            self.location.as_deref(),
            MAX_LOCATION_LENGTH,
        );

        match (name, device_type) {
            (Some(name), Some(device_type)) if errors.is_empty() => Ok(DeviceDraft {
                name,
                device_type,
                status: status.unwrap_or_default(),
                ip_address,
                location,
            }),
            _ => Err(errors),
        }
    }
}
