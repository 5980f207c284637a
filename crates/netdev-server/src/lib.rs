//! Netdev Server Library
//!
//! HTTP server that tracks network devices through their lifecycle and keeps
//! an append-only audit trail of every change.
//!
//! # Overview
//!
//! - **Lifecycle**: create, update, status change and delete, each written
//!   together with its audit entries in one store transaction
//! - **Queries**: lookup, filtered/searched/paginated listing, per-device
//!   history (also for deleted devices) and a global activity feed
//! - **Stats**: totals and counts by type and status for dashboards
//! - **Storage**: PostgreSQL via SQLx, or an in-memory store for development
//!
//! # Architecture
//!
//! The server follows a **CQRS (Command Query Responsibility Segregation)**
//! layout:
//!
//! - **Commands** (POST, PUT, PATCH, DELETE) validate input, plan a
//!   [`store::DeviceChange`] and apply it atomically
//! - **Queries** (GET) read from the store and never write
//!
//! Commands and queries are plain structs implementing `mediator::Request`;
//! routes call their handlers directly and [`cqrs::build_mediator`] wires the
//! same handlers for in-process dispatch.
//!
//! ## Audit Trail
//!
//! Every command appends entries (CREATED, UPDATED, STATUS_CHANGED, DELETED)
//! with a fixed description. Entries outlive their device: deleting a device
//! clears each entry's live `device_id` but keeps `subject_id`.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use netdev_server::{api, config::Config, store::MemoryDeviceStore};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     api::serve(Arc::new(MemoryDeviceStore::new()), &config).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod audit;
pub mod config;
pub mod cqrs;
pub mod db;
pub mod error;
pub mod features;
pub mod middleware;
pub mod models;
pub mod store;

// Re-export commonly used types
pub use error::{AppError, ServerResult};
