//! Test fixtures for handler tests
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::features::shared::test_helpers::*;
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let store = memory_store();
//!     let device = TestDevice::new("core-1").insert(&store).await;
//!     // ... test logic ...
//! }
//! ```

use netdev_common::DeviceType;
use std::sync::Arc;

use crate::features::devices::commands::{create, CreateDeviceCommand};
use crate::features::devices::types::DeviceInput;
use crate::models::Device;
use crate::store::{MemoryDeviceStore, SharedStore};

/// Fresh, empty in-memory store
pub fn memory_store() -> SharedStore {
    Arc::new(MemoryDeviceStore::new())
}

/// Builder for devices created through the real create command
#[derive(Debug, Clone)]
pub struct TestDevice {
    pub input: DeviceInput,
}

impl TestDevice {
    pub fn new(name: &str) -> Self {
        Self {
            input: DeviceInput {
                name: Some(name.to_string()),
                device_type: Some(DeviceType::Router.as_str().to_string()),
                ..Default::default()
            },
        }
    }

    pub fn with_type(mut self, device_type: DeviceType) -> Self {
        self.input.device_type = Some(device_type.as_str().to_string());
        self
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.input.status = Some(status.to_string());
        self
    }

    pub fn with_ip(mut self, ip_address: &str) -> Self {
        self.input.ip_address = Some(ip_address.to_string());
        self
    }

    pub fn with_location(mut self, location: &str) -> Self {
        self.input.location = Some(location.to_string());
        self
    }

    #[allow(clippy::expect_used)]
    pub async fn insert(self, store: &SharedStore) -> Device {
        create::handle(store.clone(), CreateDeviceCommand { input: self.input })
            .await
            .expect("test device should be valid")
    }
}
