//! Device lifecycle feature
//!
//! Commands plan their change with [`lifecycle`] and hand it to the store;
//! queries read straight from the store.

pub mod commands;
pub mod lifecycle;
pub mod queries;
pub mod routes;
pub mod types;

pub use commands::{
    CreateDeviceCommand, DeleteDeviceCommand, UpdateDeviceCommand, UpdateDeviceStatusCommand,
};
pub use queries::{DeviceLogsQuery, GetDeviceQuery, ListDevicesQuery, ListDevicesResponse};
pub use routes::devices_routes;
pub use types::DeviceInput;
