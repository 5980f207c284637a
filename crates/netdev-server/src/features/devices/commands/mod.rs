pub mod create;
pub mod delete;
pub mod update;
pub mod update_status;

pub use create::CreateDeviceCommand;
pub use delete::DeleteDeviceCommand;
pub use update::UpdateDeviceCommand;
pub use update_status::UpdateDeviceStatusCommand;
