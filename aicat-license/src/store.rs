//! Stored-key persistence.
//!
//! The store is the alternate entitlement source: the purchase controller
//! asks it whether a key is present before consulting the provider.
//! Implementations must tolerate missing or corrupt backing storage by
//! reporting no key, never by failing the caller.

use crate::error::{LicenseError, LicenseResult};
use crate::key::LicenseKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::warn;

/// Read/write access to the locally stored license key.
pub trait LicenseStore: Send + Sync {
    /// Returns the stored key, if a valid one is present.
    fn stored_key(&self) -> Option<LicenseKey>;

    /// Persists a key, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the key cannot be written to backing storage.
    fn save(&self, key: &LicenseKey) -> LicenseResult<()>;

    /// Removes the stored key. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if backing storage cannot be modified.
    fn clear(&self) -> LicenseResult<()>;
}

/// On-disk document wrapping the key.
///
/// The key is stored raw and re-validated on load, so a document edited
/// by hand cannot smuggle an invalid key past [`LicenseKey::parse`].
#[derive(Debug, Serialize, Deserialize)]
struct StoredLicense {
    key: String,
    saved_at: DateTime<Utc>,
}

/// File-backed store, by default at `<config_dir>/aicat/license.json`.
#[derive(Debug)]
pub struct FileLicenseStore {
    path: PathBuf,
}

impl FileLicenseStore {
    /// Creates a store at the default platform config location.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Storage`] when the platform exposes no
    /// config directory.
    pub fn new() -> LicenseResult<Self> {
        let base = dirs::config_dir()
            .ok_or_else(|| LicenseError::Storage("no config directory".to_string()))?;
        Ok(Self::at_path(base.join("aicat").join("license.json")))
    }

    /// Creates a store at an explicit path.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl LicenseStore for FileLicenseStore {
    fn stored_key(&self) -> Option<LicenseKey> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read license file");
                return None;
            }
        };

        let doc: StoredLicense = match serde_json::from_str(&raw) {
            Ok(doc) => doc,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "license file is malformed");
                return None;
            }
        };

        match LicenseKey::parse(&doc.key) {
            Ok(key) => Some(key),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "stored license key is invalid");
                None
            }
        }
    }

    fn save(&self, key: &LicenseKey) -> LicenseResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let doc = StoredLicense {
            key: key.as_str().to_string(),
            saved_at: Utc::now(),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&doc)?)?;
        Ok(())
    }

    fn clear(&self) -> LicenseResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store for tests and ephemeral embedding.
#[derive(Debug, Default)]
pub struct MemoryLicenseStore {
    key: Mutex<Option<LicenseKey>>,
}

impl MemoryLicenseStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given key.
    #[must_use]
    pub fn with_key(key: LicenseKey) -> Self {
        Self {
            key: Mutex::new(Some(key)),
        }
    }
}

impl LicenseStore for MemoryLicenseStore {
    fn stored_key(&self) -> Option<LicenseKey> {
        self.key.lock().expect("license store lock poisoned").clone()
    }

    fn save(&self, key: &LicenseKey) -> LicenseResult<()> {
        *self.key.lock().expect("license store lock poisoned") = Some(key.clone());
        Ok(())
    }

    fn clear(&self) -> LicenseResult<()> {
        *self.key.lock().expect("license store lock poisoned") = None;
        Ok(())
    }
}
