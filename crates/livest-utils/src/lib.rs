//! Shared utilities for livest
//!
//! This crate provides common functionality used across the livest workspace:
//! tracing setup and the application-level configuration file.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{Config, LogFormat};
pub use error::{Result, UtilsError};
pub use logging::init_tracing_with;
