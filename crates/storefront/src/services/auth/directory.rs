//! Staff account directory.
//!
//! Accounts live in a YAML file outside the source tree. Passwords are stored
//! only as Argon2 PHC strings.
//!
//! ```yaml
//! - id: 1
//!   username: admin
//!   name: Administrator
//!   role: admin
//!   password_hash: "$argon2id$v=19$m=19456,t=2,p=1$..."
//! ```

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::info;

use nordora_core::{Role, UserId};

use super::AuthError;
use crate::models::CurrentUser;

/// Checks a username and password.
pub trait CredentialVerifier {
    /// Return the account for valid credentials.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the user is unknown or the
    /// password does not match.
    fn verify(&self, username: &str, password: &SecretString) -> Result<CurrentUser, AuthError>;
}

#[derive(Clone, Deserialize)]
struct AccountRecord {
    id: UserId,
    username: String,
    name: String,
    role: Role,
    password_hash: String,
}

impl AccountRecord {
    fn to_user(&self) -> CurrentUser {
        CurrentUser {
            id: self.id,
            username: self.username.clone(),
            name: self.name.clone(),
            role: self.role,
        }
    }
}

/// Accounts loaded from a directory file.
#[derive(Clone)]
pub struct UserDirectory {
    accounts: Vec<AccountRecord>,
}

impl UserDirectory {
    /// Load accounts from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a
    /// username appears twice.
    pub fn load(path: &Path) -> Result<Self, AuthError> {
        let text = std::fs::read_to_string(path)?;
        let directory = Self::from_yaml(&text)?;
        info!(path = %path.display(), accounts = directory.len(), "Loaded account directory");
        Ok(directory)
    }

    /// Parse accounts from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a list of accounts, or if a
    /// username appears twice.
    pub fn from_yaml(text: &str) -> Result<Self, AuthError> {
        let accounts: Vec<AccountRecord> = serde_yaml::from_str(text)?;

        let mut seen = HashSet::new();
        for account in &accounts {
            if !seen.insert(account.username.as_str()) {
                return Err(AuthError::DuplicateUsername(account.username.clone()));
            }
        }

        Ok(Self { accounts })
    }

    /// Number of accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the directory has no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl CredentialVerifier for UserDirectory {
    fn verify(&self, username: &str, password: &SecretString) -> Result<CurrentUser, AuthError> {
        let account = self
            .accounts
            .iter()
            .find(|a| a.username == username)
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password.expose_secret(), &account.password_hash)?;
        Ok(account.to_user())
    }
}

// Hashes stay out of logs.
impl fmt::Debug for UserDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let usernames: Vec<&str> = self.accounts.iter().map(|a| a.username.as_str()).collect();
        f.debug_struct("UserDirectory")
            .field("usernames", &usernames)
            .finish()
    }
}

/// Hash a password using Argon2id, for adding accounts to the directory.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &SecretString) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.expose_secret().as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
