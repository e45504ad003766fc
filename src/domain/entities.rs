//! Domain Entities - Core business objects
//!
//! These entities represent the visitor-facing concepts of the portfolio
//! backend. They have no external dependencies beyond serde.

use serde::Serialize;
use std::fmt;

/// Country code returned when a lookup cannot be resolved.
pub const UNKNOWN_COUNTRY_CODE: &str = "XX";

/// Country name returned when a lookup cannot be resolved.
pub const UNKNOWN_COUNTRY_NAME: &str = "Unknown";

/// Best-guess textual IP of the visitor, derived once per request.
///
/// The value is whatever the proxy headers or the socket reported; it is
/// not checked for IP syntax.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ClientAddress(String);

impl ClientAddress {
    pub fn new(ip: impl Into<String>) -> Self {
        Self(ip.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClientAddress {
    fn from(ip: &str) -> Self {
        Self::new(ip)
    }
}

/// Country attribution for a visitor.
///
/// Always carries both fields; unresolvable lookups use the
/// `XX` / `Unknown` sentinel instead of missing values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryResult {
    /// ISO 3166-1 alpha-2 code, or `XX`
    pub country_code: String,
    /// English country name, or `Unknown`
    pub country_name: String,
}

impl CountryResult {
    /// Build a result, substituting the sentinel for empty fields.
    pub fn new(country_code: impl Into<String>, country_name: impl Into<String>) -> Self {
        let country_code = country_code.into();
        let country_name = country_name.into();
        Self {
            country_code: if country_code.trim().is_empty() {
                UNKNOWN_COUNTRY_CODE.to_string()
            } else {
                country_code
            },
            country_name: if country_name.trim().is_empty() {
                UNKNOWN_COUNTRY_NAME.to_string()
            } else {
                country_name
            },
        }
    }

    /// The `XX` / `Unknown` sentinel.
    pub fn unknown() -> Self {
        Self {
            country_code: UNKNOWN_COUNTRY_CODE.to_string(),
            country_name: UNKNOWN_COUNTRY_NAME.to_string(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.country_code == UNKNOWN_COUNTRY_CODE && self.country_name == UNKNOWN_COUNTRY_NAME
    }
}

impl From<CountryRecord> for CountryResult {
    fn from(record: CountryRecord) -> Self {
        Self::new(
            record.iso_code.unwrap_or_default(),
            record.name.unwrap_or_default(),
        )
    }
}

/// Raw country data as reported by a geo database.
///
/// Either field may be absent; databases do not guarantee both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountryRecord {
    pub iso_code: Option<String>,
    pub name: Option<String>,
}

impl CountryRecord {
    pub fn new(iso_code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            iso_code: Some(iso_code.into()),
            name: Some(name.into()),
        }
    }
}
