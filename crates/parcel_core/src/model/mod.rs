//! Domain model for parcel tracking.
//!
//! # Responsibility
//! - Define the data structures shared by store and service layers.
//!
//! # Invariants
//! - Every persisted parcel is identified by a storage-assigned `ParcelNumber`.
//! - Deletion is physical; there are no tombstones.

pub mod parcel;
