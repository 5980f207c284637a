//! Domain models

pub mod device;

pub use device::{timestamp_now, Device, DeviceDraft};
