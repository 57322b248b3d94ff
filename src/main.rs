use anyhow::{bail, Context, Result};
use clap::Parser;
use std::env;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

use borg_manager::config;
use borg_manager::managers::backup::BackupManager;
use borg_manager::managers::logging;
use borg_manager::utils::{mount, prompt, space};

#[derive(Parser)]
#[command(name = "borg-manager")]
#[command(about = "Backup orchestration tool wrapping borg", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to configuration file (defaults to config.toml beside the executable)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Context to run, by name, skipping the interactive menu
    #[arg(long)]
    context: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_console_logging();

    let config_path = match cli.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let config = config::load_config(&config_path)?;
    let base_dir = base_directory(&config_path)?;

    if which::which("borg").is_err() {
        bail!("borg not found in PATH; install borg before running backups");
    }

    let mount_point = match mount::find_mount_point(&config.global.uuid) {
        Some(path) => path,
        None => bail!(
            "backup volume (UUID {}) is not mounted",
            config.global.uuid
        ),
    };
    info!("Backup volume mounted at {}", mount_point.display());

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let (name, context) = match &cli.context {
        Some(name) => {
            let context = config
                .contextes
                .get(name)
                .with_context(|| format!("context '{}' not found in configuration", name))?;
            (name.as_str(), context)
        }
        None => {
            let (name, context) =
                prompt::select_context(&config.contextes, &mut input, &mut output)?;
            (name.as_str(), context)
        }
    };
    info!("Selected context '{}'", name);

    let manager = BackupManager::new(config.global.clone(), base_dir);
    let run = manager.prepare_run(context)?;

    if !space::check_space(
        &mount_point,
        config.global.free_space_threshold_gb,
        &mut input,
        &mut output,
    )? {
        println!("Aborted by operator.");
        return Ok(());
    }

    manager.execute(context, &run)?;

    println!("\nDone. Log available at: {}", run.log_file.display());
    Ok(())
}

/// `config.toml` in the directory holding the executable
fn default_config_path() -> Result<PathBuf> {
    let exe = env::current_exe().context("cannot determine the executable path")?;
    let dir = exe
        .parent()
        .context("executable has no parent directory")?;
    Ok(dir.join("config.toml"))
}

/// Directory the config file lives in; relative config paths resolve here
fn base_directory(config_path: &Path) -> Result<PathBuf> {
    let canonical = config_path
        .canonicalize()
        .with_context(|| format!("cannot resolve config path {}", config_path.display()))?;
    let parent = canonical
        .parent()
        .context("config path has no parent directory")?;
    Ok(parent.to_path_buf())
}
