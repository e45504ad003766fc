//! MaxMind Country Database
//!
//! Implements CountryDatabase using a MaxMind GeoLite2-Country database.

use crate::domain::entities::CountryRecord;
use crate::domain::ports::{CountryDatabase, LookupError};
use maxminddb::{MaxMindDBError, Reader};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::net::IpAddr;
use std::path::Path;
use std::sync::Arc;

/// Language used for country names.
const NAME_LANGUAGE: &str = "en";

/// MaxMind GeoLite2-Country reader.
///
/// The file is read into memory once at construction and shared by
/// every lookup afterwards.
pub struct MaxMindCountryDb {
    reader: Arc<Reader<Vec<u8>>>,
}

impl MaxMindCountryDb {
    /// Load a GeoIP database from a file path.
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let reader = Reader::open_readfile(path)?;
        Ok(Self {
            reader: Arc::new(reader),
        })
    }

    /// Load a GeoIP database from raw `.mmdb` bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> anyhow::Result<Self> {
        let reader = Reader::from_source(bytes)?;
        Ok(Self {
            reader: Arc::new(reader),
        })
    }

    /// Database type string from the file metadata, e.g. `GeoLite2-Country`.
    pub fn database_type(&self) -> &str {
        &self.reader.metadata.database_type
    }
}

impl CountryDatabase for MaxMindCountryDb {
    fn lookup_country(&self, ip: IpAddr) -> Result<CountryRecord, LookupError> {
        #[derive(Debug, Deserialize)]
        struct Country {
            iso_code: Option<String>,
            names: Option<BTreeMap<String, String>>,
        }

        #[derive(Debug, Deserialize)]
        struct CountryResp {
            country: Option<Country>,
        }

        let resp: CountryResp = self.reader.lookup(ip).map_err(|e| match e {
            MaxMindDBError::AddressNotFoundError(_) => LookupError::NotFound,
            other => LookupError::Database(other.to_string()),
        })?;

        let country = resp.country.ok_or(LookupError::NotFound)?;
        let name = country
            .names
            .and_then(|mut names| names.remove(NAME_LANGUAGE));

        Ok(CountryRecord {
            iso_code: country.iso_code,
            name,
        })
    }
}
