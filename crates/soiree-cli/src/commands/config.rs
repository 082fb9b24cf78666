use anyhow::Result;
use tracing::info;

use soiree_core::AppConfig;

/// Write the current (default-filled) configuration to disk
pub fn init(config: &AppConfig, force: bool) -> Result<()> {
    let path = AppConfig::config_path();
    if path.exists() && !force {
        println!("Config already exists: {}", path.display());
        println!("Use --force to overwrite it.");
        return Ok(());
    }

    config.save()?;
    info!("Wrote configuration to {}", path.display());
    println!("Wrote {}", path.display());
    Ok(())
}

pub fn path() -> Result<()> {
    println!("{}", AppConfig::config_path().display());
    Ok(())
}
