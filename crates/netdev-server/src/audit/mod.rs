//! Device audit trail
//!
//! Every lifecycle command appends one or more entries describing what
//! happened. Entries are append-only: nothing in the server updates or
//! deletes them. When a device is deleted the store clears each entry's live
//! `device_id` link but keeps `subject_id`, so a deleted device's history can
//! still be read by id.
//!
//! Entries are written by the store as part of the same transaction as the
//! device change they describe (see [`crate::store::DeviceChange`]).

pub mod models;

pub use models::{AuditEntry, AuditIntent, DEFAULT_RECENT_LIMIT, MAX_RECENT_LIMIT};
