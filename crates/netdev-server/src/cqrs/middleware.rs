//! Marker traits separating writes from reads
//!
//! Every request type implements exactly one of these next to its
//! `mediator::Request` impl.

/// A request that changes state and is recorded in the audit trail
pub trait Command {}

/// A request that only reads state
pub trait Query {}
