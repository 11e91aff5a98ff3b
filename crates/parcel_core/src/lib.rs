//! Persistence layer for parcel records moving through a delivery lifecycle.
//!
//! Address changes and deletion are only permitted while a parcel is
//! `registered`; everything else is plain CRUD over one SQLite table.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig};
pub use model::parcel::{ClientId, Parcel, ParcelNumber};
pub use model::status::{
    ParcelStatus, UnknownStatus, PARCEL_STATUS_DELIVERED, PARCEL_STATUS_REGISTERED,
    PARCEL_STATUS_SENT,
};
pub use repo::parcel_store::{
    MutationOutcome, ParcelStore, RepoError, RepoResult, SqliteParcelStore,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
