//! Adapters Layer
//!
//! `inbound` drives the application (HTTP); `outbound` implements the
//! domain ports (MaxMind, OpenAI).

pub mod inbound;
pub mod outbound;
