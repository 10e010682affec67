//! Authentication service.
//!
//! Staff sign in with a username and password checked by a
//! [`CredentialVerifier`]. The resulting [`Session`] is kept in device
//! storage and lapses after a fixed lifetime.

mod directory;
mod error;

pub use directory::{CredentialVerifier, UserDirectory, hash_password};
pub use error::AuthError;

use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, warn};

use crate::models::{CurrentUser, Session};
use crate::storage::{KeyValueStorage, Persistence, keys};

/// Session lifetime when none is configured.
pub const DEFAULT_SESSION_HOURS: i64 = 24;

/// Authentication service.
///
/// Every method that depends on the clock takes `now`, so expiry can be
/// checked without waiting.
#[derive(Debug)]
pub struct AuthService<S> {
    persistence: Persistence<S>,
    lifetime: Duration,
}

impl<S: KeyValueStorage> AuthService<S> {
    /// Create a service storing its session in `storage`.
    #[must_use]
    pub const fn new(storage: S, lifetime: Duration) -> Self {
        Self {
            persistence: Persistence::new(storage),
            lifetime,
        }
    }

    // =========================================================================
    // Sign in / out
    // =========================================================================

    /// Check credentials and start a session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` if either field is blank.
    /// Returns `AuthError::InvalidCredentials` if the verifier rejects them.
    pub fn login<V: CredentialVerifier + ?Sized>(
        &self,
        verifier: &V,
        username: &str,
        password: &SecretString,
        now: DateTime<Utc>,
    ) -> Result<CurrentUser, AuthError> {
        let username = username.trim();
        if username.is_empty() || password.expose_secret().trim().is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let user = verifier.verify(username, password).inspect_err(|e| {
            warn!(username, error = %e, "Login failed");
        })?;

        let session = Session {
            user: user.clone(),
            expires_at: now + self.lifetime,
        };
        self.persistence.save(keys::SESSION, &session);

        info!(username = %user.username, role = %user.role, "Signed in");
        Ok(user)
    }

    /// End the current session, if any.
    pub fn logout(&self) {
        self.persistence.clear(keys::SESSION);
        debug!("Session cleared");
    }

    // =========================================================================
    // Session queries
    // =========================================================================

    /// The signed-in user, if the stored session is still live at `now`.
    ///
    /// An expired or unreadable session is cleared.
    pub fn current_user(&self, now: DateTime<Utc>) -> Option<CurrentUser> {
        self.live_session(now).map(|session| session.user)
    }

    /// Whether a live session exists at `now`.
    pub fn is_authenticated(&self, now: DateTime<Utc>) -> bool {
        self.current_user(now).is_some()
    }

    /// Push the expiry of a live session to `now` plus the lifetime.
    ///
    /// Returns the user whose session was extended, or `None` if there was
    /// no live session.
    pub fn extend_session(&self, now: DateTime<Utc>) -> Option<CurrentUser> {
        let mut session = self.live_session(now)?;
        session.expires_at = now + self.lifetime;
        self.persistence.save(keys::SESSION, &session);
        debug!(username = %session.user.username, expires_at = %session.expires_at, "Session extended");
        Some(session.user)
    }

    /// The signed-in user, provided they may edit the catalog.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` without a live session.
    /// Returns `AuthError::Forbidden` if the role cannot manage stock.
    pub fn require_stock_access(&self, now: DateTime<Utc>) -> Result<CurrentUser, AuthError> {
        let user = self.current_user(now).ok_or(AuthError::NotAuthenticated)?;
        if !user.role.can_manage_stock() {
            return Err(AuthError::Forbidden(user.role));
        }
        Ok(user)
    }

    fn live_session(&self, now: DateTime<Utc>) -> Option<Session> {
        let session: Session = self.persistence.load_optional(keys::SESSION)?;
        if session.is_expired(now) {
            info!(username = %session.user.username, "Session expired");
            self.logout();
            return None;
        }
        Some(session)
    }
}
