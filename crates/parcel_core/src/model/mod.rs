//! Parcel domain model.
//!
//! # Responsibility
//! - Define the record shape persisted in the `parcel` table.
//! - Own the status vocabulary, including the one literal the store guards on.
//!
//! # Invariants
//! - `number` is assigned by storage and never reused or mutated.
//! - Status text is opaque to storage except for `registered`.

pub mod parcel;
pub mod status;
