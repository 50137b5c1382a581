use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// The save file listing every known list
    #[serde(default = "default_save_file")]
    pub save_file: String,
    /// Staging directory for per-list cache files
    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            save_file: default_save_file(),
            cache_dir: default_cache_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Root of the content-addressed blob directory
    #[serde(default = "default_store_dir")]
    pub dir: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            dir: default_store_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Number of entries shown around an edited position
    #[serde(default = "default_window")]
    pub window: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            window: default_window(),
        }
    }
}

fn default_save_file() -> String {
    "~/.skydo.save".to_string()
}

fn default_cache_dir() -> String {
    "~/.skydo".to_string()
}

fn default_store_dir() -> String {
    "~/.skydo/store".to_string()
}

fn default_window() -> usize {
    5
}

/// Resolved on-disk locations used by the sync layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub save_file: PathBuf,
    pub cache_dir: PathBuf,
}

impl Paths {
    pub fn new(save_file: impl Into<PathBuf>, cache_dir: impl Into<PathBuf>) -> Self {
        Paths {
            save_file: save_file.into(),
            cache_dir: cache_dir.into(),
        }
    }

    /// Where a malformed save file is copied before it gets replaced
    pub fn backup_file(&self) -> PathBuf {
        let mut name = self
            .save_file
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".bak");
        self.save_file.with_file_name(name)
    }

    /// Cache file for a list, derived from its name.
    ///
    /// Bytes outside `[A-Za-z0-9 _-.]` (and a leading `.`) are written as
    /// `%XX`, so distinct names never share a file and no name can step
    /// outside `cache_dir`.
    pub fn cache_file(&self, list_name: &str) -> PathBuf {
        let mut escaped = String::with_capacity(list_name.len());
        for (i, b) in list_name.bytes().enumerate() {
            let keep = b.is_ascii_alphanumeric()
                || b == b' '
                || b == b'_'
                || b == b'-'
                || (b == b'.' && i > 0);
            if keep {
                escaped.push(b as char);
            } else {
                escaped.push_str(&format!("%{:02X}", b));
            }
        }
        self.cache_dir.join(escaped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_on_empty_document() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.paths.save_file, "~/.skydo.save");
        assert_eq!(config.paths.cache_dir, "~/.skydo");
        assert_eq!(config.store.dir, "~/.skydo/store");
        assert_eq!(config.display.window, 5);
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let config: Config = toml::from_str("[display]\nwindow = 9\n").unwrap();
        assert_eq!(config.display.window, 9);
        assert_eq!(config.paths.save_file, "~/.skydo.save");
    }

    #[test]
    fn cache_file_escapes_separators() {
        let paths = Paths::new("/h/.skydo.save", "/h/.skydo");
        assert_eq!(paths.cache_file("Groceries"), PathBuf::from("/h/.skydo/Groceries"));
        assert_eq!(paths.cache_file("a/b"), PathBuf::from("/h/.skydo/a%2Fb"));
        assert_eq!(paths.cache_file(".."), PathBuf::from("/h/.skydo/%2E."));
        assert_ne!(paths.cache_file("a%2Fb"), paths.cache_file("a/b"));
    }

    #[test]
    fn backup_file_sits_next_to_save_file() {
        let paths = Paths::new("/h/.skydo.save", "/h/.skydo");
        assert_eq!(paths.backup_file(), PathBuf::from("/h/.skydo.save.bak"));
    }
}
