use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::io::local::atomic_write;
use crate::io::remote::{GatewayError, RemoteStore, content_address, is_valid_skylink};

/// Content-addressed store in a local directory.
///
/// Blobs live at `<root>/<first two hex chars>/<skylink>`. Publishing the
/// same bytes twice yields the same skylink and writes once, unless the
/// stored blob no longer matches its address, in which case it is rewritten.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirStore { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn blob_path(&self, skylink: &str) -> PathBuf {
        self.root.join(&skylink[..2]).join(skylink)
    }
}

impl RemoteStore for DirStore {
    fn fetch(&self, skylink: &str) -> Result<Vec<u8>, GatewayError> {
        if !is_valid_skylink(skylink) {
            return Err(GatewayError::InvalidSkylink(skylink.to_string()));
        }
        let path = self.blob_path(skylink);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(GatewayError::NotFound(skylink.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        if content_address(&bytes) != skylink {
            return Err(GatewayError::Corrupt(skylink.to_string()));
        }
        log::debug!("fetched {} bytes from {}", bytes.len(), path.display());
        Ok(bytes)
    }

    fn publish(&self, bytes: &[u8]) -> Result<String, GatewayError> {
        let skylink = content_address(bytes);
        let path = self.blob_path(&skylink);
        match fs::read(&path) {
            Ok(existing) if content_address(&existing) == skylink => {
                log::debug!("{} already stored", skylink);
                return Ok(skylink);
            }
            Ok(_) => log::warn!("rewriting damaged blob {}", path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        atomic_write(&path, bytes)?;
        log::debug!("stored {} bytes at {}", bytes.len(), path.display());
        Ok(skylink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn publish_then_fetch() {
        let tmp = TempDir::new().unwrap();
        let store = DirStore::new(tmp.path());
        let link = store.publish(b"Groceries\nmilk").unwrap();
        assert_eq!(store.fetch(&link).unwrap(), b"Groceries\nmilk");
        assert!(tmp.path().join(&link[..2]).join(&link).is_file());
    }

    #[test]
    fn publish_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let store = DirStore::new(tmp.path());
        let a = store.publish(b"same").unwrap();
        let b = store.publish(b"same").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn fetch_unknown_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let store = DirStore::new(tmp.path());
        let link = content_address(b"never stored");
        assert!(matches!(store.fetch(&link), Err(GatewayError::NotFound(_))));
    }

    #[test]
    fn fetch_rejects_malformed_skylink() {
        let tmp = TempDir::new().unwrap();
        let store = DirStore::new(tmp.path());
        assert!(matches!(
            store.fetch("../../etc/passwd"),
            Err(GatewayError::InvalidSkylink(_))
        ));
    }

    #[test]
    fn fetch_detects_tampering() {
        let tmp = TempDir::new().unwrap();
        let store = DirStore::new(tmp.path());
        let link = store.publish(b"original").unwrap();
        fs::write(tmp.path().join(&link[..2]).join(&link), b"tampered").unwrap();
        assert!(matches!(store.fetch(&link), Err(GatewayError::Corrupt(_))));
    }

    #[test]
    fn republish_repairs_damaged_blob() {
        let tmp = TempDir::new().unwrap();
        let store = DirStore::new(tmp.path());
        let link = store.publish(b"A\nx").unwrap();
        let blob = tmp.path().join(&link[..2]).join(&link);
        fs::write(&blob, b"garbage").unwrap();

        assert_eq!(store.publish(b"A\nx").unwrap(), link);
        assert_eq!(fs::read(&blob).unwrap(), b"A\nx");
        assert_eq!(store.fetch(&link).unwrap(), b"A\nx");
    }
}
