//! Configuration module for borg-manager
//!
//! This module handles loading and validating configuration from TOML files.
//!
//! The configuration lives beside the program and has a `[global]` section
//! (volume UUID, repository location, free-space threshold) plus one
//! `[contextes.<name>]` table per backup context. Every key is required;
//! no defaults are synthesized for a missing or partial file.

mod loader;
mod types;

pub use loader::{load_config, ConfigError, Result};
pub use types::*;
