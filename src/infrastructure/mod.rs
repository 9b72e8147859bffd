//! Infrastructure layer - Framework implementations
//!
//! This layer contains:
//! - Configuration loading (config)
//! - Logging setup (logging)

pub mod config;
pub mod logging;
