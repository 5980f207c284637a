pub mod get;
pub mod list;
pub mod logs;

pub use get::GetDeviceQuery;
pub use list::{ListDevicesQuery, ListDevicesResponse};
pub use logs::DeviceLogsQuery;
