use std::path::Path;

use fileview_core::GalleryConfig;

use crate::cli::ConfigCommands;
use crate::error::CliError;

pub fn run_config(command: ConfigCommands, config_path: &Path) -> Result<(), CliError> {
    match command {
        ConfigCommands::Show => {
            let config = GalleryConfig::load_from_path(config_path)?;
            println!("{}", config.to_json_pretty()?);
        }
        ConfigCommands::Path => println!("{}", config_path.display()),
        ConfigCommands::Init { force } => {
            run_config_init(config_path, force)?;
            println!("{}", config_path.display());
        }
    }
    Ok(())
}

pub fn run_config_init(config_path: &Path, force: bool) -> Result<(), CliError> {
    if config_path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists; pass --force to overwrite",
            config_path.display()
        )));
    }

    GalleryConfig::default().save_to_path(config_path)?;
    tracing::info!(path = %config_path.display(), "Wrote default gallery config");
    Ok(())
}
