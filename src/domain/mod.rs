//! Domain Layer
//!
//! Core value objects and the ports the application layer depends on.
//! Nothing in here knows about HTTP, MaxMind or OpenAI.

pub mod entities;
pub mod ports;

pub use entities::{ClientAddress, CountryRecord, CountryResult};
