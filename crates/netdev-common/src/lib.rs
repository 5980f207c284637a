//! Netdev Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, logging setup and error handling for the netdev workspace.
//!
//! # Overview
//!
//! - **Types**: the closed enumerations every component agrees on
//!   ([`DeviceType`], [`DeviceStatus`], [`AuditAction`])
//! - **Error Handling**: [`CommonError`] for parsing and configuration failures
//! - **Logging**: `tracing` subscriber configuration shared by all binaries
//!
//! # Example
//!
//! ```
//! use netdev_common::{DeviceStatus, DeviceType};
//!
//! let status: DeviceStatus = "maintenance".parse().unwrap();
//! assert_eq!(status, DeviceStatus::Maintenance);
//! assert_eq!(DeviceType::AccessPoint.as_str(), "ACCESS_POINT");
//! ```

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{CommonError, Result};
pub use types::{AuditAction, DeviceStatus, DeviceType};
