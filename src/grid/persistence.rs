use super::registry::GridRegistry;
use crate::error::ConfigurationError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub fn config_path() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    Ok(home_dir.join(".stepwager").join("grids.json"))
}

/// Load the registry from the default location, falling back to the
/// built-in grids when no config file exists. A file that exists but
/// cannot be read or parsed is an error.
pub fn load_registry() -> Result<GridRegistry, ConfigurationError> {
    match config_path() {
        Ok(path) if path.exists() => load_registry_from(&path),
        Ok(_) => Ok(GridRegistry::builtin()),
        Err(e) => {
            log::debug!("no home directory for grid config ({e}), using built-in grids");
            Ok(GridRegistry::builtin())
        }
    }
}

pub fn load_registry_from(path: &Path) -> Result<GridRegistry, ConfigurationError> {
    let json = fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let registry: GridRegistry =
        serde_json::from_str(&json).map_err(|source| ConfigurationError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    log::info!(
        "loaded {} grid(s) from {} (house edge {})",
        registry.grids.len(),
        path.display(),
        registry.house_edge.value()
    );
    Ok(registry)
}

pub fn save_registry(registry: &GridRegistry, path: &Path) -> Result<(), ConfigurationError> {
    let io_err = |source| ConfigurationError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let json = serde_json::to_string_pretty(registry).map_err(|source| {
        ConfigurationError::Parse {
            path: path.to_path_buf(),
            source,
        }
    })?;
    fs::write(path, json).map_err(io_err)
}
