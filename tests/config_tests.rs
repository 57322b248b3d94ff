// Integration tests for configuration loading and validation

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use borg_manager::config;

fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_full_config_loads() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_config(
        &temp_dir,
        r#"
[global]
uuid = "ABCD-1234"
repo_relative_path = "backup-repo"
free_space_threshold_gb = 25.5

[contextes.home]
description = "Home directory"
exclude_file = "excludes-home.txt"
prefix = "home"
source = "/home/user"
keep_archives = 7

[contextes.photos]
description = "Photo library"
exclude_file = "excludes-photos.txt"
prefix = "photos"
source = "/data/photos"
keep_archives = 4
"#,
    );

    let config = config::load_config(&config_path).unwrap();

    assert_eq!(config.global.uuid, "ABCD-1234");
    assert_eq!(config.global.repo_relative_path, "backup-repo");
    assert_eq!(config.global.free_space_threshold_gb, 25.5);

    assert_eq!(config.contextes.len(), 2);
    let names: Vec<&String> = config.contextes.keys().collect();
    assert_eq!(names, ["home", "photos"]);

    let photos = &config.contextes["photos"];
    assert_eq!(photos.description, "Photo library");
    assert_eq!(photos.exclude_file, "excludes-photos.txt");
    assert_eq!(photos.prefix, "photos");
    assert_eq!(photos.source, "/data/photos");
    assert_eq!(photos.keep_archives, 4);
}

#[test]
fn test_absent_config_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let result = config::load_config(&config_path);
    let err = result.unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn test_missing_global_key_fails() {
    let temp_dir = TempDir::new().unwrap();
    // free_space_threshold_gb omitted
    let config_path = write_config(
        &temp_dir,
        r#"
[global]
uuid = "ABCD-1234"
repo_relative_path = "backup-repo"

[contextes.home]
description = "Home directory"
exclude_file = "excludes.txt"
prefix = "home"
source = "/home/user"
keep_archives = 7
"#,
    );

    assert!(config::load_config(&config_path).is_err());
}

#[test]
fn test_config_without_contexts_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_config(
        &temp_dir,
        r#"
[global]
uuid = "ABCD-1234"
repo_relative_path = "backup-repo"
free_space_threshold_gb = 10.0

[contextes]
"#,
    );

    assert!(config::load_config(&config_path).is_err());
}
