//! Persistence for the generative-API credential.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::error::{Result, StackError};

/// Key under which the credential is stored.
pub const CREDENTIAL_KEY: &str = "google_ai_api_key";

/// Keyring service name.
pub const KEYRING_SERVICE: &str = "stackref";

pub trait CredentialStore: Send + Sync {
    fn get(&self) -> Result<Option<String>>;
    fn set(&self, credential: &str) -> Result<()>;
    /// Remove the credential. Clearing an empty store is not an error.
    fn clear(&self) -> Result<()>;
}

/// In-process store, used when persistence is off and in tests.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    value: Mutex<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(credential: &str) -> Self {
        Self {
            value: Mutex::new(Some(credential.to_string())),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self) -> Result<Option<String>> {
        Ok(self.value.lock().clone())
    }

    fn set(&self, credential: &str) -> Result<()> {
        *self.value.lock() = Some(credential.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.value.lock() = None;
        Ok(())
    }
}

/// JSON object on disk; other keys in the file are preserved.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/stackref/credentials.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("stackref").join("credentials.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw)
            .map_err(|err| StackError::Serialization(format!("credential file parse: {err}")))
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(entries)
            .map_err(|err| StackError::Serialization(format!("credential file serialize: {err}")))?;
        fs::write(&self.path, payload)?;
        restrict_permissions(&self.path)
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

impl CredentialStore for FileCredentialStore {
    fn get(&self) -> Result<Option<String>> {
        Ok(self
            .load()?
            .remove(CREDENTIAL_KEY)
            .filter(|value| !value.trim().is_empty()))
    }

    fn set(&self, credential: &str) -> Result<()> {
        let mut entries = self.load()?;
        entries.insert(CREDENTIAL_KEY.to_string(), credential.to_string());
        self.save(&entries)
    }

    fn clear(&self) -> Result<()> {
        let mut entries = self.load()?;
        if entries.remove(CREDENTIAL_KEY).is_none() {
            return Ok(());
        }
        self.save(&entries)
    }
}

/// OS keyring entry `stackref` / `google_ai_api_key`.
#[derive(Debug, Clone)]
pub struct KeyringCredentialStore {
    service: String,
    user: String,
}

impl Default for KeyringCredentialStore {
    fn default() -> Self {
        Self::new(KEYRING_SERVICE)
    }
}

impl KeyringCredentialStore {
    pub fn new(service: &str) -> Self {
        Self {
            service: service.to_string(),
            user: CREDENTIAL_KEY.to_string(),
        }
    }

    fn entry(&self) -> Result<keyring::Entry> {
        keyring::Entry::new(&self.service, &self.user)
            .map_err(|err| StackError::CredentialStore(format!("keyring entry: {err}")))
    }
}

impl CredentialStore for KeyringCredentialStore {
    fn get(&self) -> Result<Option<String>> {
        match self.entry()?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(err) => Err(StackError::CredentialStore(format!("keyring read: {err}"))),
        }
    }

    fn set(&self, credential: &str) -> Result<()> {
        self.entry()?
            .set_password(credential)
            .map_err(|err| StackError::CredentialStore(format!("keyring write: {err}")))
    }

    fn clear(&self) -> Result<()> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(err) => Err(StackError::CredentialStore(format!("keyring delete: {err}"))),
        }
    }
}
