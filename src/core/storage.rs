// src/core/storage.rs

//! Persistence backends for the account store.
//!
//! State is kept as two independent entries: the full account list and the
//! record of the signed-in account.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::core::models::Account;
use crate::error::StoreError;

const ACCOUNTS_FILE: &str = "accounts.json";
const ACTIVE_ACCOUNT_FILE: &str = "active_account.json";

/// Where the account store reads its state at startup and writes it after
/// every mutation.
pub trait AccountBackend: Send {
    fn load_accounts(&self) -> Result<Vec<Account>, StoreError>;
    fn save_accounts(&mut self, accounts: &[Account]) -> Result<(), StoreError>;
    fn load_active(&self) -> Result<Option<Account>, StoreError>;
    /// Writes the signed-in account, or clears the entry when `None`.
    fn save_active(&mut self, active: Option<&Account>) -> Result<(), StoreError>;
}

/// Stores both entries as pretty-printed JSON files in one directory.
pub struct JsonFileBackend {
    dir: PathBuf,
}

impl JsonFileBackend {
    /// Creates the backend, making sure `dir` exists.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        info!(dir = %dir.display(), "Using JSON account storage.");
        Ok(Self { dir })
    }

    fn accounts_path(&self) -> PathBuf {
        self.dir.join(ACCOUNTS_FILE)
    }

    fn active_path(&self) -> PathBuf {
        self.dir.join(ACTIVE_ACCOUNT_FILE)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "No stored state yet.");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

impl AccountBackend for JsonFileBackend {
    fn load_accounts(&self) -> Result<Vec<Account>, StoreError> {
        Ok(read_json(&self.accounts_path())?.unwrap_or_default())
    }

    fn save_accounts(&mut self, accounts: &[Account]) -> Result<(), StoreError> {
        fs::write(self.accounts_path(), serde_json::to_string_pretty(accounts)?)?;
        Ok(())
    }

    fn load_active(&self) -> Result<Option<Account>, StoreError> {
        read_json(&self.active_path())
    }

    fn save_active(&mut self, active: Option<&Account>) -> Result<(), StoreError> {
        let path = self.active_path();
        match active {
            Some(account) => fs::write(path, serde_json::to_string_pretty(account)?)?,
            None => match fs::remove_file(&path) {
                Err(e) if e.kind() != ErrorKind::NotFound => return Err(e.into()),
                _ => {}
            },
        }
        Ok(())
    }
}

/// Keeps state in memory only; nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    pub accounts: Vec<Account>,
    pub active: Option<Account>,
}

impl AccountBackend for MemoryBackend {
    fn load_accounts(&self) -> Result<Vec<Account>, StoreError> {
        Ok(self.accounts.clone())
    }

    fn save_accounts(&mut self, accounts: &[Account]) -> Result<(), StoreError> {
        self.accounts = accounts.to_vec();
        Ok(())
    }

    fn load_active(&self) -> Result<Option<Account>, StoreError> {
        Ok(self.active.clone())
    }

    fn save_active(&mut self, active: Option<&Account>) -> Result<(), StoreError> {
        self.active = active.cloned();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_backend_round_trips_both_entries() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = JsonFileBackend::new(dir.path().join("state")).unwrap();
        assert!(backend.load_accounts().unwrap().is_empty());
        assert!(backend.load_active().unwrap().is_none());

        let account = Account::new("a@b.com", "a");
        backend.save_accounts(std::slice::from_ref(&account)).unwrap();
        backend.save_active(Some(&account)).unwrap();

        assert_eq!(backend.load_accounts().unwrap(), vec![account.clone()]);
        assert_eq!(backend.load_active().unwrap(), Some(account));

        backend.save_active(None).unwrap();
        assert!(backend.load_active().unwrap().is_none());
        // Clearing twice is not an error.
        backend.save_active(None).unwrap();
    }

    #[test]
    fn json_backend_reports_corrupt_state() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path()).unwrap();
        fs::write(dir.path().join(ACCOUNTS_FILE), "not json").unwrap();
        assert!(matches!(backend.load_accounts(), Err(StoreError::Serde(_))));
    }
}
