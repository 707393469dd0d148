//! Parcel domain model.
//!
//! # Responsibility
//! - Define the single record persisted in the `parcel` table.
//! - Name the status values the store and service understand.
//!
//! # Invariants
//! - `number` is assigned by storage and never reused after deletion.
//! - `client` and `created_at` never change after creation.
//! - `address` is only mutable while `status == STATUS_REGISTERED`.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Storage-assigned parcel identifier.
pub type ParcelNumber = i64;

/// Identifier of the client that owns a parcel.
pub type ClientId = i64;

/// Freshly accepted parcel; address changes and deletion are allowed.
pub const STATUS_REGISTERED: &str = "registered";
/// Handed over to the carrier.
pub const STATUS_SHIPPED: &str = "shipped";
/// Received by the addressee. Terminal.
pub const STATUS_DELIVERED: &str = "delivered";

/// One tracked shipment.
///
/// `status` stays a plain string: storage accepts any value and transitions
/// are not validated at this layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parcel {
    /// Zero until the parcel has been persisted.
    pub number: ParcelNumber,
    pub client: ClientId,
    pub status: String,
    pub address: String,
    /// RFC3339 timestamp text, stored verbatim.
    pub created_at: String,
}

impl Parcel {
    /// Creates an unsaved parcel with caller-provided fields.
    pub fn new(
        client: ClientId,
        status: impl Into<String>,
        address: impl Into<String>,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            number: 0,
            client,
            status: status.into(),
            address: address.into(),
            created_at: created_at.into(),
        }
    }

    /// Creates an unsaved `registered` parcel stamped with the current UTC time.
    pub fn registered(client: ClientId, address: impl Into<String>) -> Self {
        Self::new(
            client,
            STATUS_REGISTERED,
            address,
            Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        )
    }

    pub fn is_registered(&self) -> bool {
        self.status == STATUS_REGISTERED
    }
}

/// Returns the status that follows `current` in the delivery flow.
///
/// `registered -> shipped -> delivered`. Returns `None` for `delivered` and
/// for any status outside this flow.
pub fn next_status(current: &str) -> Option<&'static str> {
    match current {
        STATUS_REGISTERED => Some(STATUS_SHIPPED),
        STATUS_SHIPPED => Some(STATUS_DELIVERED),
        _ => None,
    }
}
