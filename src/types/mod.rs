//! Shared types

pub mod errors;

pub use errors::{ConfigError, Result};
