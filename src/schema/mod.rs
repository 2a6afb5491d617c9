//! Schema module - Configuration types for a search run.

mod config;

pub use config::*;
