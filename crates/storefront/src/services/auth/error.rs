//! Authentication error types.

use nordora_core::Role;
use thiserror::Error;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username or password left blank.
    #[error("username and password are required")]
    MissingCredentials,

    /// Invalid credentials (wrong password or unknown user).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No live session.
    #[error("not signed in")]
    NotAuthenticated,

    /// The signed-in role may not perform the operation.
    #[error("role {0} is not allowed to do this")]
    Forbidden(Role),

    /// The account directory lists the same username twice.
    #[error("duplicate username in account directory: {0}")]
    DuplicateUsername(String),

    /// Account directory could not be read.
    #[error("failed to read account directory: {0}")]
    Io(#[from] std::io::Error),

    /// Account directory is not valid YAML or has the wrong shape.
    #[error("failed to parse account directory: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
