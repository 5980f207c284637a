//! Global audit activity feed

pub mod queries;
pub mod routes;

pub use queries::RecentLogsQuery;
pub use routes::audit_logs_routes;
