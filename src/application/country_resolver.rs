//! Country Resolver - visitor geo attribution use case
//!
//! Maps a visitor IP string to a country, memoizing successful lookups.
//! Failures are never surfaced to callers as errors; they come back as
//! `Resolution::Unavailable` and `country_for` turns that into the
//! `XX` / `Unknown` sentinel.

use crate::domain::entities::CountryResult;
use crate::domain::ports::{CountryDatabase, LookupError};
use crate::infrastructure::ResolutionCache;
use std::net::IpAddr;
use std::sync::Arc;

/// Addresses answered with the sentinel without touching the database.
const LOCAL_ADDRESSES: [&str; 2] = ["127.0.0.1", "::1"];

/// Why no country could be attributed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnavailableCause {
    /// Missing, empty or loopback address
    Local,
    /// The input was not an IP address
    InvalidAddress,
    /// No database was loaded at startup
    DatabaseUnavailable,
    /// The database has no entry for the address
    NotFound,
    /// The database failed while answering
    Lookup(String),
}

/// Outcome of a single resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(CountryResult),
    Unavailable(UnavailableCause),
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// Collapse to a country, using the sentinel when unavailable.
    pub fn into_country(self) -> CountryResult {
        match self {
            Self::Resolved(country) => country,
            Self::Unavailable(_) => CountryResult::unknown(),
        }
    }
}

/// Resolves visitor IPs to countries.
///
/// Owns the database handle and the cache. Built once at startup and
/// shared between requests behind an `Arc`.
pub struct CountryResolver {
    database: Option<Arc<dyn CountryDatabase>>,
    cache: ResolutionCache,
}

impl CountryResolver {
    /// Create a resolver. `database` is `None` when the geo database
    /// could not be opened; every lookup then degrades to the sentinel.
    pub fn new(database: Option<Arc<dyn CountryDatabase>>, cache_capacity: usize) -> Self {
        Self {
            database,
            cache: ResolutionCache::new(cache_capacity),
        }
    }

    pub fn has_database(&self) -> bool {
        self.database.is_some()
    }

    /// Number of addresses currently memoized.
    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    pub fn cache_capacity(&self) -> usize {
        self.cache.capacity()
    }

    /// Resolve `ip`, reporting why when no country is available.
    ///
    /// Only successful lookups are cached, so a transient database error
    /// is retried on the next request for the same address.
    pub fn resolve(&self, ip: Option<&str>) -> Resolution {
        let ip = match ip {
            Some(ip) if !ip.is_empty() && !LOCAL_ADDRESSES.contains(&ip) => ip,
            _ => return Resolution::Unavailable(UnavailableCause::Local),
        };

        if let Some(cached) = self.cache.get(ip) {
            return Resolution::Resolved(cached);
        }

        let addr: IpAddr = match ip.parse() {
            Ok(addr) => addr,
            Err(_) => {
                tracing::debug!("not an IP address, skipping geo lookup: {:?}", ip);
                return Resolution::Unavailable(UnavailableCause::InvalidAddress);
            }
        };

        let Some(database) = &self.database else {
            return Resolution::Unavailable(UnavailableCause::DatabaseUnavailable);
        };

        match database.lookup_country(addr) {
            Ok(record) => {
                let country = CountryResult::from(record);
                self.cache.insert(ip.to_string(), country.clone());
                Resolution::Resolved(country)
            }
            Err(LookupError::NotFound) => {
                tracing::debug!("no country for {}", addr);
                Resolution::Unavailable(UnavailableCause::NotFound)
            }
            Err(LookupError::Database(e)) => {
                tracing::warn!("geo lookup failed for {}: {}", addr, e);
                Resolution::Unavailable(UnavailableCause::Lookup(e))
            }
        }
    }

    /// Resolve `ip` to a country, never failing.
    pub fn country_for(&self, ip: Option<&str>) -> CountryResult {
        self.resolve(ip).into_country()
    }
}
