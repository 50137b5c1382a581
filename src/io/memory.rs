use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::io::local::LocalStore;
use crate::io::remote::{GatewayError, RemoteStore, content_address};

/// In-memory content-addressed store for testing.
///
/// Uses `RefCell` for interior mutability since everything runs on one
/// thread, so the `RemoteStore` trait can take `&self`.
#[derive(Default)]
pub struct MemStore {
    blobs: RefCell<HashMap<String, Vec<u8>>>,
    fail_fetch: Cell<bool>,
    /// Publishes left before failures start; `None` means unlimited
    publish_budget: Cell<Option<usize>>,
    publish_count: Cell<usize>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every fetch fail.
    pub fn set_simulate_fetch_error(&self, simulate: bool) {
        self.fail_fetch.set(simulate);
    }

    /// Let `n` more publishes succeed, then fail the rest.
    pub fn fail_publishes_after(&self, n: usize) {
        self.publish_budget.set(Some(n));
    }

    /// Number of successful publishes so far
    pub fn publish_count(&self) -> usize {
        self.publish_count.get()
    }

    /// Store bytes directly (as if someone else had published them).
    pub fn insert(&self, bytes: &[u8]) -> String {
        let skylink = content_address(bytes);
        self.blobs.borrow_mut().insert(skylink.clone(), bytes.to_vec());
        skylink
    }

    pub fn get(&self, skylink: &str) -> Option<Vec<u8>> {
        self.blobs.borrow().get(skylink).cloned()
    }
}

impl RemoteStore for MemStore {
    fn fetch(&self, skylink: &str) -> Result<Vec<u8>, GatewayError> {
        if self.fail_fetch.get() {
            return Err(GatewayError::Unavailable("simulated fetch error".to_string()));
        }
        self.get(skylink)
            .ok_or_else(|| GatewayError::NotFound(skylink.to_string()))
    }

    fn publish(&self, bytes: &[u8]) -> Result<String, GatewayError> {
        match self.publish_budget.get() {
            Some(0) => {
                return Err(GatewayError::Unavailable(
                    "simulated publish error".to_string(),
                ));
            }
            Some(n) => self.publish_budget.set(Some(n - 1)),
            None => {}
        }
        self.publish_count.set(self.publish_count.get() + 1);
        Ok(self.insert(bytes))
    }
}

/// In-memory local files for testing.
#[derive(Default)]
pub struct MemLocalStore {
    files: RefCell<HashMap<PathBuf, Vec<u8>>>,
    simulate_write_error: Cell<bool>,
}

impl MemLocalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Current contents of a file, if written
    pub fn get(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.files.borrow().get(path.as_ref()).cloned()
    }

    /// Seed a file directly.
    pub fn put(&self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) {
        self.files.borrow_mut().insert(path.into(), bytes.into());
    }
}

impl LocalStore for MemLocalStore {
    fn read(&self, path: &Path) -> io::Result<Option<Vec<u8>>> {
        Ok(self.get(path))
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        if self.simulate_write_error.get() {
            return Err(io::Error::other("simulated write error"));
        }
        self.put(path, bytes);
        Ok(())
    }
}
