//! Parcel tracking persistence core.
//! Owns the `parcel` table and every statement issued against it.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LogConfig};
pub use model::parcel::{
    next_status, ClientId, Parcel, ParcelNumber, STATUS_DELIVERED, STATUS_REGISTERED,
    STATUS_SHIPPED,
};
pub use repo::parcel_repo::{ParcelRepository, RepoError, RepoResult, SqliteParcelRepository};
pub use service::parcel_service::ParcelService;

/// Minimal health-check API for linkage probes.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
