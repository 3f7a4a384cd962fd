use super::StateBackend;
use crate::error::{LicenPrepError, Result};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the store is single-threaded,
/// which lets `StateBackend` take `&self` everywhere.
#[derive(Default)]
pub struct MemBackend {
    blobs: RefCell<HashMap<String, String>>,
    writes: Cell<usize>,
    simulate_write_error: Cell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing blob, as if written by an earlier run.
    pub fn with_blob(key: &str, blob: impl Into<String>) -> Self {
        let backend = Self::new();
        backend.blobs.borrow_mut().insert(key.to_string(), blob.into());
        backend
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    pub fn blob(&self, key: &str) -> Option<String> {
        self.blobs.borrow().get(key).cloned()
    }
}

impl StateBackend for MemBackend {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blob(key))
    }

    fn save(&self, key: &str, blob: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(LicenPrepError::Store("Simulated write error".to_string()));
        }
        self.blobs
            .borrow_mut()
            .insert(key.to_string(), blob.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
