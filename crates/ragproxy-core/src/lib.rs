//! # ragproxy-core
//!
//! Core types, configuration, and utilities for ragproxy.
//!
//! This crate provides shared functionality used across all ragproxy crates:
//!
//! - **Configuration**: Loading, environment overrides, and validation
//! - **Types**: Request and response payloads exchanged between services
//! - **Utilities**: Environment variable handling

pub mod config;
pub mod env;
pub mod error;
pub mod types;

// Re-exports for convenience
pub use config::Config;
pub use error::{ConfigError, Result};
pub use types::*;
