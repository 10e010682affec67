//! Command implementations.
//!
//! Each command opens what it needs, dispatches to the store or the auth
//! service, and lets a view subscriber draw the result on stdout. Diagnostics
//! go through `tracing` on stderr.

pub mod auth;
pub mod cart;
pub mod products;
mod views;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::info;

use nordora_storefront::config::ConfigError;
use nordora_storefront::models::CurrentUser;
use nordora_storefront::services::auth::{AuthError, AuthService};
use nordora_storefront::storage::{KeyValueStorage, StorageError};
use nordora_storefront::store::{Change, Notice, NoticeLevel, Rejection};

/// Errors that end a command with a non-zero exit status.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The store refused the action.
    #[error("{0}")]
    Rejected(Notice),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Check for a staff session that may edit stock, and keep it alive.
pub fn require_staff<S: KeyValueStorage>(
    auth: &AuthService<S>,
    now: DateTime<Utc>,
) -> Result<CurrentUser, CliError> {
    let user = auth.require_stock_access(now)?;
    auth.extend_session(now);
    info!(username = %user.username, role = %user.role, "Stock access granted");
    Ok(user)
}

/// Turn a dispatch result into a command result.
///
/// Informational rejections (already in cart, not in cart) are shown but
/// do not fail the command.
fn settle(result: Result<Change, Rejection>) -> Result<Option<Change>, CliError> {
    match result {
        Ok(change) => Ok(Some(change)),
        Err(rejection) => {
            let notice = rejection.notice();
            match notice.level {
                NoticeLevel::Info => {
                    views::notice(&notice)?;
                    Ok(None)
                }
                NoticeLevel::Error => Err(CliError::Rejected(notice)),
            }
        }
    }
}
