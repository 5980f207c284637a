//! Dashboard statistics

pub mod queries;
pub mod routes;

pub use queries::{CountBy, DeviceStats, GetStatsQuery};
pub use routes::stats_routes;
