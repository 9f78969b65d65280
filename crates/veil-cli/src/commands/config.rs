use anyhow::{Result, bail};
use std::path::Path;
use veil_config::{Config, PROJECT_FILE, ProjectConfig};

use crate::cli::ConfigCommands;

pub fn handle(cmd: ConfigCommands, explicit: Option<&Path>) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show(explicit),
        ConfigCommands::Path => path(explicit),
        ConfigCommands::Init { force } => init(&std::env::current_dir()?, force),
    }
}

fn show(explicit: Option<&Path>) -> Result<()> {
    let config = Config::effective(explicit)?;
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

fn path(explicit: Option<&Path>) -> Result<()> {
    match explicit {
        Some(path) => println!("{}", path.display()),
        None => println!("{}", Config::config_path().display()),
    }
    if let Some(root) = ProjectConfig::find_project_root()? {
        println!("{}", root.join(PROJECT_FILE).display());
    }
    Ok(())
}

fn init(dir: &Path, force: bool) -> Result<()> {
    let target = dir.join(PROJECT_FILE);
    if target.exists() && !force {
        bail!("{} already exists in {}", PROJECT_FILE, dir.display());
    }

    ProjectConfig::starter().save(dir)?;

    println!("✓ Created {}", target.display());
    println!("  Add [[terms]] entries for names the detector should always catch");
    Ok(())
}
