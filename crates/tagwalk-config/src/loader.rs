//! Locating and reading `tagwalk.toml`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{Config, ConfigError, ConfigResult};

/// File name looked up by [`find_and_load_config`].
pub const CONFIG_FILE_NAME: &str = "tagwalk.toml";

/// Reads, parses and validates the configuration at `path`.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] for a missing file, and a read, parse or
/// validation error otherwise.
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<Config> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading configuration");

    let content = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ConfigError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ConfigError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;
    Ok(config)
}

/// Loads the nearest configuration, starting at the working directory.
///
/// # Errors
///
/// See [`find_and_load_config_from`].
pub fn find_and_load_config() -> ConfigResult<Config> {
    let start_dir = std::env::current_dir().map_err(|source| ConfigError::Read {
        path: PathBuf::from("."),
        source,
    })?;
    find_and_load_config_from(start_dir)
}

/// Loads the first [`CONFIG_FILE_NAME`] found in `start_dir` or one of its
/// ancestors.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] when no ancestor has one, or any error
/// from [`load_config`].
pub fn find_and_load_config_from(start_dir: impl AsRef<Path>) -> ConfigResult<Config> {
    let start_dir = start_dir.as_ref();
    match locate(start_dir) {
        Some(path) => load_config(path),
        None => Err(ConfigError::NotFound {
            path: start_dir.join(CONFIG_FILE_NAME),
        }),
    }
}

fn locate(start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}
