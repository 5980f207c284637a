//! Feature modules implementing the netdev API
//!
//! Each feature is a vertical slice following the CQRS (Command Query
//! Responsibility Segregation) pattern, with its own commands, queries and
//! routes.
//!
//! # Features
//!
//! - **devices**: device lifecycle (create, update, status, delete), lookup,
//!   filtered listing and per-device history
//! - **audit_logs**: global recent-activity feed
//! - **stats**: dashboard counts and recent activity
//!
//! # Architecture
//!
//! Each feature module follows the structure:
//! - `commands/` - Write operations
//! - `queries/` - Read operations
//! - `routes.rs` - HTTP route definitions
//!
//! Commands and queries implement `mediator::Request`, so they can also be
//! dispatched in-process through [`crate::cqrs::build_mediator`].

pub mod audit_logs;
pub mod devices;
pub mod shared;
pub mod stats;

use axum::Router;

use crate::store::SharedStore;

/// Creates the API router with all feature routes mounted
///
/// - `/devices` - Device lifecycle and history
/// - `/logs` - Recent activity across all devices
/// - `/stats` - Dashboard statistics
pub fn router(store: SharedStore) -> Router<()> {
    Router::new()
        .nest("/devices", devices::devices_routes())
        .nest("/logs", audit_logs::audit_logs_routes())
        .nest("/stats", stats::stats_routes())
        .with_state(store)
}
