mod schema;
mod storage;

pub use schema::{Branches, Config, RepoEntry};
pub use storage::ConfigStore;

use crate::error::GhopperError;
use std::io;
use std::path::PathBuf;

/// Get the config directory path (~/.config/ghopper/)
pub fn get_config_dir() -> Result<PathBuf, GhopperError> {
    let home = dirs::home_dir().ok_or_else(|| {
        GhopperError::io(
            "Could not determine home directory",
            io::Error::new(io::ErrorKind::NotFound, "no home directory"),
        )
    })?;
    Ok(home.join(".config").join("ghopper"))
}

/// Get the default config file path (~/.config/ghopper/config.json)
pub fn get_config_path() -> Result<PathBuf, GhopperError> {
    Ok(get_config_dir()?.join("config.json"))
}
