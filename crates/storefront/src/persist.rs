//! Durable key-value slots for cart persistence.
//!
//! The browser original kept the cart in local storage: a flat string value
//! under a fixed key, written after every mutation and read once per session.
//! [`KeyValueSlot`] reproduces that contract behind a trait so the cart store
//! can run against an in-memory slot in tests and a file-backed slot in the
//! CLI.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error accessing a key-value slot.
#[derive(Debug, Error)]
pub enum SlotError {
    /// Underlying I/O failed.
    #[error("slot I/O error: {0}")]
    Io(#[from] io::Error),
}

/// A durable string-valued slot keyed by name.
///
/// Reads and writes are synchronous and treated as non-blocking at this
/// scale. Callers own the interpretation of the stored string; slots never
/// inspect values.
pub trait KeyValueSlot {
    /// Read the value under `key`, or `None` if nothing was stored.
    ///
    /// # Errors
    ///
    /// Returns `SlotError` if the backing store could not be read.
    fn read(&self, key: &str) -> Result<Option<String>, SlotError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `SlotError` if the backing store could not be written.
    fn write(&mut self, key: &str, value: &str) -> Result<(), SlotError>;
}

/// In-memory slot. State lives for the lifetime of the process only.
#[derive(Debug, Default)]
pub struct MemorySlot {
    values: HashMap<String, String>,
}

impl MemorySlot {
    /// Create an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot pre-seeded with one value, as if a prior session had
    /// persisted it.
    #[must_use]
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut slot = Self::new();
        slot.values.insert(key.into(), value.into());
        slot
    }
}

impl KeyValueSlot for MemorySlot {
    fn read(&self, key: &str) -> Result<Option<String>, SlotError> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), SlotError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed slot: each key maps to `<dir>/<key>.json`.
///
/// The directory is created on first write. This is the durable slot used by
/// the CLI so cart state survives across invocations.
#[derive(Debug)]
pub struct FileSlot {
    dir: PathBuf,
}

impl FileSlot {
    /// Create a slot over the given directory.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueSlot for FileSlot {
    fn read(&self, key: &str) -> Result<Option<String>, SlotError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SlotError::Io(e)),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), SlotError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }
}
