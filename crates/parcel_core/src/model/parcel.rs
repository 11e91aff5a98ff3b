//! Parcel record.
//!
//! # Responsibility
//! - Mirror one `parcel` row field-for-field.
//! - Provide the constructor used for fresh registrations.
//!
//! # Invariants
//! - `number` is ignored on insert; storage assigns it.
//! - `created_at` is stored verbatim and never parsed.

use crate::model::status::PARCEL_STATUS_REGISTERED;
use serde::{Deserialize, Serialize};

/// Storage-assigned parcel identifier (SQLite `INTEGER PRIMARY KEY`).
pub type ParcelNumber = i64;

/// Identifier of the client that owns a parcel. Not validated against any
/// client table.
pub type ClientId = i64;

/// One tracked shipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parcel {
    /// Assigned by `ParcelStore::add`; `0` for records not yet persisted.
    pub number: ParcelNumber,
    pub client: ClientId,
    /// Free-form status text. See `ParcelStatus` for the known values.
    pub status: String,
    /// Delivery address. Mutable only while registered.
    pub address: String,
    /// Caller-supplied timestamp text.
    pub created_at: String,
}

impl Parcel {
    /// Creates an unsaved parcel in the `registered` state.
    pub fn registered(
        client: ClientId,
        address: impl Into<String>,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            number: 0,
            client,
            status: PARCEL_STATUS_REGISTERED.to_string(),
            address: address.into(),
            created_at: created_at.into(),
        }
    }

    /// Returns whether address changes and deletion are currently allowed.
    pub fn is_registered(&self) -> bool {
        self.status == PARCEL_STATUS_REGISTERED
    }
}
