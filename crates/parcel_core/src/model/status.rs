//! Parcel status vocabulary.
//!
//! The store treats status as opaque text and compares only against
//! [`PARCEL_STATUS_REGISTERED`]. [`ParcelStatus`] is the typed view for
//! callers that want a closed set.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Initial status. Address changes and deletion are only permitted here.
pub const PARCEL_STATUS_REGISTERED: &str = "registered";
pub const PARCEL_STATUS_SENT: &str = "sent";
pub const PARCEL_STATUS_DELIVERED: &str = "delivered";

/// Known delivery lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParcelStatus {
    /// Accepted, not yet handed to a carrier.
    Registered,
    /// In transit.
    Sent,
    /// Handed to the recipient.
    Delivered,
}

impl ParcelStatus {
    /// Returns the text persisted in `parcel.status`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Registered => PARCEL_STATUS_REGISTERED,
            Self::Sent => PARCEL_STATUS_SENT,
            Self::Delivered => PARCEL_STATUS_DELIVERED,
        }
    }
}

impl Display for ParcelStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when status text is outside the known vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl Display for UnknownStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown parcel status `{}`; expected registered|sent|delivered",
            self.0
        )
    }
}

impl Error for UnknownStatus {}

impl FromStr for ParcelStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            PARCEL_STATUS_REGISTERED => Ok(Self::Registered),
            PARCEL_STATUS_SENT => Ok(Self::Sent),
            PARCEL_STATUS_DELIVERED => Ok(Self::Delivered),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ParcelStatus, UnknownStatus};

    #[test]
    fn parse_accepts_stored_text() {
        assert_eq!("sent".parse::<ParcelStatus>(), Ok(ParcelStatus::Sent));
        assert_eq!(
            "delivered".parse::<ParcelStatus>(),
            Ok(ParcelStatus::Delivered)
        );
    }

    #[test]
    fn parse_is_case_sensitive() {
        let err = "Registered".parse::<ParcelStatus>().unwrap_err();
        assert_eq!(err, UnknownStatus("Registered".to_string()));
    }

    #[test]
    fn display_matches_stored_text() {
        assert_eq!(ParcelStatus::Registered.to_string(), "registered");
    }
}
