//! Portfolio backend library
//!
//! This module exposes the portfolio components for use in integration tests
//! and as a library.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod site;

// Re-export commonly used types
pub use adapters::inbound::{extract_client_ip, router, AppState, HttpServer};
pub use adapters::outbound::{MaxMindCountryDb, OpenAiChatClient, OpenAiConfig};
pub use application::{ChatService, CountryResolver, Resolution, UnavailableCause};
pub use config::{load_config, Config};
pub use domain::entities::{ClientAddress, CountryRecord, CountryResult};
pub use domain::ports::{ChatError, ChatModel, CountryDatabase, LookupError};
pub use error::ApiError;
pub use site::SiteContent;
