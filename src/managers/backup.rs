//! Backup manager - orchestrates one backup run
//!
//! A run is strictly linear: prepare paths, create the archive, prune old
//! archives sharing the context prefix. Borg's own exit statuses are logged
//! but never stop the run or change the program's exit code.

use crate::config::{ContextConfig, GlobalConfig};
use crate::utils::borg;
use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Minute-granularity run timestamp. Two runs of the same context within
/// one minute share archive and log names.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H%M";

/// Everything derived once per run from the base directory, the selected
/// context and the run timestamp.
#[derive(Debug, Clone)]
pub struct RunPaths {
    /// Absolute path to the borg repository
    pub repository: PathBuf,
    /// Absolute path to the context's exclude file
    pub exclude_file: PathBuf,
    /// Per-run log file, `logs/<prefix>_<timestamp>.log` beside the config
    pub log_file: PathBuf,
    /// Archive name, `<prefix>-<timestamp>`
    pub archive_name: String,
}

impl RunPaths {
    /// Resolve paths for one run and create the `logs` directory.
    ///
    /// Idempotent apart from the directory creation, which is itself
    /// idempotent.
    pub fn prepare(
        base_dir: &Path,
        global: &GlobalConfig,
        context: &ContextConfig,
        timestamp: &str,
    ) -> Result<Self> {
        let repository = base_dir.join(&global.repo_relative_path);
        let exclude_file = base_dir.join(&context.exclude_file);

        let log_dir = base_dir.join("logs");
        fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;
        let log_file = log_dir.join(format!("{}_{}.log", context.prefix, timestamp));

        let archive_name = format!("{}-{}", context.prefix, timestamp);

        Ok(Self {
            repository,
            exclude_file,
            log_file,
            archive_name,
        })
    }
}

pub struct BackupManager {
    global: GlobalConfig,
    base_dir: PathBuf,
}

impl BackupManager {
    /// Create new backup manager rooted at the config file's directory
    pub fn new(global: GlobalConfig, base_dir: PathBuf) -> Self {
        Self { global, base_dir }
    }

    /// Resolve the paths for a run of `context`, stamped with the current time
    pub fn prepare_run(&self, context: &ContextConfig) -> Result<RunPaths> {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        RunPaths::prepare(&self.base_dir, &self.global, context, &timestamp)
    }

    /// Create the archive, then prune, for an already-prepared run
    pub fn execute(&self, context: &ContextConfig, run: &RunPaths) -> Result<()> {
        println!("\nStarting archive: {}", run.archive_name);
        info!(
            "Creating archive {} from {}",
            run.archive_name, context.source
        );

        let status = borg::create_archive(
            &run.repository,
            &run.archive_name,
            &context.source,
            &run.exclude_file,
            &run.log_file,
        )?;
        if !status.success() {
            warn!("borg create exited with {}", status);
        }

        println!("\nPruning (retention: {} archives)...", context.keep_archives);
        info!(
            "Pruning archives with prefix {}-, keeping {}",
            context.prefix, context.keep_archives
        );

        let status = borg::prune_archives(&run.repository, &context.prefix, context.keep_archives)?;
        if !status.success() {
            warn!("borg prune exited with {}", status);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_global() -> GlobalConfig {
        GlobalConfig {
            uuid: "ABCD-1234".to_string(),
            repo_relative_path: "repo".to_string(),
            free_space_threshold_gb: 10.0,
        }
    }

    fn sample_context() -> ContextConfig {
        ContextConfig {
            description: "Home directory".to_string(),
            exclude_file: "excludes-home.txt".to_string(),
            prefix: "home".to_string(),
            source: "/home/user".to_string(),
            keep_archives: 7,
        }
    }

    #[test]
    fn test_run_paths_naming() {
        let dir = TempDir::new().unwrap();
        let run = RunPaths::prepare(
            dir.path(),
            &sample_global(),
            &sample_context(),
            "2024-01-15_0930",
        )
        .unwrap();

        assert_eq!(run.archive_name, "home-2024-01-15_0930");
        assert_eq!(run.repository, dir.path().join("repo"));
        assert_eq!(run.exclude_file, dir.path().join("excludes-home.txt"));
        assert_eq!(
            run.log_file,
            dir.path().join("logs").join("home_2024-01-15_0930.log")
        );
    }

    #[test]
    fn test_run_paths_creates_log_directory() {
        let dir = TempDir::new().unwrap();
        assert!(!dir.path().join("logs").exists());

        RunPaths::prepare(
            dir.path(),
            &sample_global(),
            &sample_context(),
            "2024-01-15_0930",
        )
        .unwrap();

        assert!(dir.path().join("logs").is_dir());
    }

    #[test]
    fn test_run_paths_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let first = RunPaths::prepare(
            dir.path(),
            &sample_global(),
            &sample_context(),
            "2024-01-15_0930",
        )
        .unwrap();
        let second = RunPaths::prepare(
            dir.path(),
            &sample_global(),
            &sample_context(),
            "2024-01-15_0930",
        )
        .unwrap();

        assert_eq!(first.repository, second.repository);
        assert_eq!(first.exclude_file, second.exclude_file);
        assert_eq!(first.log_file, second.log_file);
        assert_eq!(first.archive_name, second.archive_name);
    }

    #[test]
    fn test_prepare_run_uses_minute_timestamp() {
        let dir = TempDir::new().unwrap();
        let manager = BackupManager::new(sample_global(), dir.path().to_path_buf());
        let run = manager.prepare_run(&sample_context()).unwrap();

        // home-YYYY-MM-DD_HHMM
        let suffix = run.archive_name.strip_prefix("home-").unwrap();
        assert_eq!(suffix.len(), "2024-01-15_0930".len());
        let name = run.log_file.file_name().unwrap().to_string_lossy();
        assert_eq!(name.as_ref(), format!("home_{}.log", suffix));
    }
}
