use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::model::config::{Config, Paths};

/// Error type for config I/O
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Default config location, respecting XDG_CONFIG_HOME
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| home_dir().join(".config"))
        .join("skydo")
        .join("config.toml")
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"))
}

/// Read a config file. A missing file gives the defaults.
pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read a config file, falling back to defaults with a warning if it
/// cannot be used.
pub fn load_config(path: &Path) -> Config {
    match read_config(path) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("{}; using defaults", e);
            Config::default()
        }
    }
}

/// Expand a leading `~` and environment variables in a configured path.
pub fn expand_path(raw: &str) -> PathBuf {
    match shellexpand::full(raw) {
        Ok(expanded) => PathBuf::from(expanded.into_owned()),
        Err(e) => {
            log::warn!("could not expand {:?}: {}", raw, e);
            PathBuf::from(shellexpand::tilde(raw).into_owned())
        }
    }
}

/// Resolve the save file and cache directory from a config
pub fn resolve_paths(config: &Config) -> Paths {
    Paths::new(
        expand_path(&config.paths.save_file),
        expand_path(&config.paths.cache_dir),
    )
}

/// Resolve the content store root from a config
pub fn resolve_store_dir(config: &Config) -> PathBuf {
    expand_path(&config.store.dir)
}
