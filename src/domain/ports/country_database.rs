//! Country Database Port
//!
//! Defines the interface for mapping IP addresses to countries.

use crate::domain::entities::CountryRecord;
use std::net::IpAddr;
use thiserror::Error;

/// Why a country lookup produced no record.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    /// The address is valid but absent from the database
    #[error("address not found in database")]
    NotFound,
    /// The database could not answer (corrupt file, decode failure, ...)
    #[error("database error: {0}")]
    Database(String),
}

/// Read-only geo database keyed by IP address.
///
/// This is an outbound port that abstracts the GeoIP database.
/// Implementations may use MaxMind GeoLite2 or an in-memory table.
pub trait CountryDatabase: Send + Sync {
    /// Look up the country for `ip`.
    fn lookup_country(&self, ip: IpAddr) -> Result<CountryRecord, LookupError>;
}
