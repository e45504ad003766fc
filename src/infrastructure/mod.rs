//! Infrastructure Layer
//!
//! Cross-cutting concerns and infrastructure components.

pub mod resolution_cache;
pub mod shutdown;

pub use resolution_cache::{ResolutionCache, DEFAULT_CACHE_CAPACITY};
pub use shutdown::shutdown_signal;
