use indexmap::IndexMap;
use serde::Deserialize;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub global: GlobalConfig,
    /// Named backup contexts. Insertion order is preserved so the selection
    /// menu matches the order in the file.
    pub contextes: IndexMap<String, ContextConfig>,
}

/// Global configuration settings
#[derive(Debug, Clone, Deserialize)]
pub struct GlobalConfig {
    /// Filesystem UUID of the backup volume
    pub uuid: String,

    /// Borg repository location, relative to the config file
    pub repo_relative_path: String,

    /// Minimum free space on the volume before asking for confirmation, in gigabytes
    pub free_space_threshold_gb: f64,
}

/// One backup context: what to archive and how to name and retain it
#[derive(Debug, Clone, Deserialize)]
pub struct ContextConfig {
    pub description: String,

    /// Exclude file passed to borg, relative to the config file
    pub exclude_file: String,

    /// Archive name prefix; archives are named `<prefix>-<timestamp>`
    pub prefix: String,

    /// Path to back up
    pub source: String,

    /// Number of most recent archives to keep when pruning
    pub keep_archives: u32,
}
