//! Repository layer contracts and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract for parcel records.
//! - Keep SQL details out of callers.
//!
//! # Invariants
//! - Every operation is one statement and one round trip.
//! - Guarded mutations check status in the same statement that mutates.

pub mod parcel_store;
