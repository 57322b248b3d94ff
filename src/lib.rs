//! Borg Manager Library
//!
//! This library provides backup orchestration functionality wrapping borg.

pub mod config;
pub mod managers;
pub mod utils;

// Re-export commonly used types
pub use config::{load_config, Config, ContextConfig, GlobalConfig};
pub use managers::backup::BackupManager;
