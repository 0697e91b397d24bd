//! Shared utilities for the GAUTH verification service.

pub mod logging;

pub use logging::init_tracing;
