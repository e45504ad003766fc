//! Application Layer
//!
//! Use cases that orchestrate the domain ports.

mod chat_service;
mod country_resolver;

pub use chat_service::{validate_message, ChatService, MAX_MESSAGE_CHARS, SYSTEM_PROMPT};
pub use country_resolver::{CountryResolver, Resolution, UnavailableCause};
