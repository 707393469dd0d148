//! Parcel use-case service.
//!
//! # Responsibility
//! - Provide registration and delivery-flow entry points for core callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass the repository's guarded statements.
//! - Service layer remains storage-agnostic.

use crate::model::parcel::{next_status, ClientId, Parcel, ParcelNumber};
use crate::repo::parcel_repo::{ParcelRepository, RepoResult};
use log::info;

/// Use-case service wrapper for parcel operations.
pub struct ParcelService<R: ParcelRepository> {
    repo: R,
}

impl<R: ParcelRepository> ParcelService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a new parcel for `client`, stamped with the current time.
    ///
    /// Returns the stored parcel including its assigned number.
    pub fn register(&self, client: ClientId, address: impl Into<String>) -> RepoResult<Parcel> {
        let mut parcel = Parcel::registered(client, address);
        parcel.number = self.repo.add(&parcel)?;
        info!(
            "event=parcel_register module=service status=ok number={} client={client}",
            parcel.number
        );
        Ok(parcel)
    }

    pub fn parcel(&self, number: ParcelNumber) -> RepoResult<Parcel> {
        self.repo.get(number)
    }

    pub fn client_parcels(&self, client: ClientId) -> RepoResult<Vec<Parcel>> {
        self.repo.get_by_client(client)
    }

    /// Moves a parcel one step along `registered -> shipped -> delivered`.
    ///
    /// # Contract
    /// - Returns the new status when a transition was written.
    /// - Returns `None` without writing when the current status has no successor.
    /// - Returns `NotFound` when the parcel does not exist.
    pub fn advance_status(&self, number: ParcelNumber) -> RepoResult<Option<&'static str>> {
        let parcel = self.repo.get(number)?;
        let Some(next) = next_status(&parcel.status) else {
            info!(
                "event=parcel_advance module=service status=noop number={number} current={}",
                parcel.status
            );
            return Ok(None);
        };

        self.repo.set_status(number, next)?;
        info!(
            "event=parcel_advance module=service status=ok number={number} from={} to={next}",
            parcel.status
        );
        Ok(Some(next))
    }

    /// Changes the delivery address; ignored unless the parcel is `registered`.
    pub fn change_address(&self, number: ParcelNumber, address: &str) -> RepoResult<()> {
        self.repo.set_address(number, address)
    }

    /// Removes a parcel; ignored unless the parcel is `registered`.
    pub fn cancel(&self, number: ParcelNumber) -> RepoResult<()> {
        self.repo.delete(number)
    }
}
