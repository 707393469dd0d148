//! Repository layer for parcel persistence.
//!
//! # Responsibility
//! - Define the parcel store contract.
//! - Isolate SQLite statements from service orchestration.
//!
//! # Invariants
//! - Repositories borrow an injected connection and never own its lifecycle.
//! - `NotFound` is reported by reads only; guarded mutations are silent no-ops.

pub mod parcel_repo;
