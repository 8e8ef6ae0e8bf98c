use std::fs;
use std::path::{Path, PathBuf};

use super::{Config, template};
use crate::error::ConfigError;

/// Returns the config directory: `~/.config/crossmark/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("crossmark"))
}

/// Returns the config file path: `~/.config/crossmark/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Tries to load and parse `config.toml` from the default location.
pub fn try_load() -> Result<Config, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    try_load_from(&path)
}

/// Tries to load, parse and validate the config file at `path`.
pub fn try_load_from(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate();
    Ok(config)
}

/// Loads the configuration from disk, falling back to defaults.
///
/// Non-existent files silently return defaults; other errors are logged.
pub fn load() -> Config {
    load_or_default(try_load())
}

/// Like [`load`], for an explicit path.
pub fn load_from(path: &Path) -> Config {
    load_or_default(try_load_from(path))
}

fn load_or_default(result: Result<Config, ConfigError>) -> Config {
    match result {
        Ok(config) => config,
        Err(e) if e.is_not_found() => Config::default(),
        Err(e) => {
            tracing::warn!("{e}; using default configuration");
            Config::default()
        }
    }
}

/// Writes the commented default config to `path`, creating parent
/// directories. Refuses to overwrite an existing file unless `force`.
pub fn write_default(path: &Path, force: bool) -> Result<(), ConfigError> {
    if path.exists() && !force {
        return Err(ConfigError::AlreadyExists {
            path: path.to_path_buf(),
        });
    }
    let io_err = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, template::generate()).map_err(io_err)
}
