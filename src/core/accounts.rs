// src/core/accounts.rs

//! The account store: every known account plus a pointer to the signed-in one.
//!
//! The store is an explicit object handed to callers by `&mut`. It reads its
//! state from the injected backend once and writes both entries back after
//! every mutation; the in-memory state only changes once that write succeeds.
//! There is no locking; the last write wins.

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::models::{Account, SecurityAnalysis};
use crate::core::storage::AccountBackend;
use crate::error::{AuthError, StoreError};

/// Minimum password length accepted when an account is created.
pub const MIN_PASSWORD_LEN: usize = 6;

pub struct AccountStore {
    backend: Box<dyn AccountBackend>,
    accounts: Vec<Account>,
    active: Option<Uuid>,
}

impl AccountStore {
    /// Loads the account list and the signed-in account from `backend`.
    ///
    /// A persisted session whose account is missing from the list is adopted
    /// into it, so its history is not lost.
    pub fn open(backend: Box<dyn AccountBackend>) -> Result<Self, StoreError> {
        let mut accounts = backend.load_accounts()?;
        let active = match backend.load_active()? {
            Some(session) => {
                let id = session.id;
                if !accounts.iter().any(|a| a.id == id) {
                    warn!(email = %session.email, "Session account missing from account list; adopting it.");
                    accounts.push(session);
                }
                Some(id)
            }
            None => None,
        };
        info!(accounts = accounts.len(), signed_in = active.is_some(), "Account store loaded.");
        Ok(Self { backend, accounts, active })
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn active_account(&self) -> Option<&Account> {
        let id = self.active?;
        self.accounts.iter().find(|a| a.id == id)
    }

    pub fn is_signed_in(&self) -> bool {
        self.active.is_some()
    }

    fn position_of_email(&self, email: &str) -> Option<usize> {
        self.accounts.iter().position(|a| a.email == email)
    }

    /// Signs in as `email`.
    ///
    /// A known email is signed in unconditionally, whatever the password. An
    /// unknown one creates a new account named after the email's local part,
    /// provided the email is non-empty and the password long enough.
    pub fn login(&mut self, email: &str, password: &str) -> Result<&Account, AuthError> {
        if let Some(index) = self.position_of_email(email) {
            info!(email, "Signed in to existing account.");
            return Ok(self.activate(index)?);
        }

        if email.is_empty() {
            warn!("Login refused: empty email.");
            return Err(AuthError::InvalidInput);
        }
        check_password(password)?;

        let display_name = email.split('@').next().unwrap_or(email);
        info!(email, "Creating account on first login.");
        Ok(self.create(Account::new(email, display_name))?)
    }

    /// Creates a new account and signs in to it.
    pub fn register(&mut self, email: &str, password: &str, name: &str) -> Result<&Account, AuthError> {
        if self.position_of_email(email).is_some() {
            warn!(email, "Registration refused: email already registered.");
            return Err(AuthError::AlreadyExists);
        }
        check_password(password)?;
        if email.is_empty() || name.is_empty() {
            warn!("Registration refused: empty email or name.");
            return Err(AuthError::InvalidInput);
        }

        info!(email, "Registering account.");
        Ok(self.create(Account::new(email, name))?)
    }

    /// Clears the session. Account data stays in the store.
    pub fn logout(&mut self) -> Result<(), StoreError> {
        self.backend.save_active(None)?;
        if let Some(account) = self.active_account() {
            info!(email = %account.email, "Signed out.");
        }
        self.active = None;
        Ok(())
    }

    /// Prepends `analysis` to the signed-in account's history, keeping the
    /// most recent entries only, and flushes the store.
    ///
    /// When the flush fails the history in memory is left as it was.
    pub fn record_scan(&mut self, analysis: SecurityAnalysis) -> Result<&Account, StoreError> {
        let id = self.active.ok_or(StoreError::NoActiveAccount)?;
        let index = self
            .accounts
            .iter()
            .position(|a| a.id == id)
            .ok_or(StoreError::NoActiveAccount)?;

        debug!(url = %analysis.url, "Recording scan in history.");
        let mut staged = self.accounts.clone();
        staged[index].push_scan(analysis);
        persist(self.backend.as_mut(), &staged, Some(id))?;
        self.accounts = staged;
        Ok(&self.accounts[index])
    }

    fn create(&mut self, account: Account) -> Result<&Account, StoreError> {
        let id = account.id;
        let mut staged = self.accounts.clone();
        staged.push(account);
        persist(self.backend.as_mut(), &staged, Some(id))?;
        self.accounts = staged;
        self.active = Some(id);
        Ok(&self.accounts[self.accounts.len() - 1])
    }

    fn activate(&mut self, index: usize) -> Result<&Account, StoreError> {
        let id = self.accounts[index].id;
        persist(self.backend.as_mut(), &self.accounts, Some(id))?;
        self.active = Some(id);
        Ok(&self.accounts[index])
    }
}

/// Writes both entries. Callers adopt the new state only after this succeeds.
fn persist(backend: &mut dyn AccountBackend, accounts: &[Account], active: Option<Uuid>) -> Result<(), StoreError> {
    backend.save_accounts(accounts)?;
    let session = active.and_then(|id| accounts.iter().find(|a| a.id == id));
    backend.save_active(session)
}

fn check_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        warn!("Password shorter than the minimum length.");
        return Err(AuthError::WeakCredential(MIN_PASSWORD_LEN));
    }
    Ok(())
}
