//! Staff session commands.

use std::io::{self, BufRead, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use secrecy::SecretString;

use nordora_storefront::services::auth::{self as auth_service, AuthError, AuthService, UserDirectory};
use nordora_storefront::storage::KeyValueStorage;

use super::CliError;

/// Variable checked for a password before reading stdin.
const PASSWORD_ENV: &str = "NORDORA_PASSWORD";

/// Sign in against the account directory at `users_file`.
pub fn login<S: KeyValueStorage>(
    auth: &AuthService<S>,
    users_file: &Path,
    username: &str,
    now: DateTime<Utc>,
) -> Result<(), CliError> {
    let directory = UserDirectory::load(users_file)?;
    let password = read_password()?;
    let user = auth.login(&directory, username, &password, now)?;
    writeln!(io::stdout(), "Signed in as {} ({})", user.name, user.role)?;
    Ok(())
}

/// End the session.
pub fn logout<S: KeyValueStorage>(auth: &AuthService<S>) -> Result<(), CliError> {
    auth.logout();
    writeln!(io::stdout(), "Signed out")?;
    Ok(())
}

/// Print the signed-in account.
pub fn whoami<S: KeyValueStorage>(auth: &AuthService<S>, now: DateTime<Utc>) -> Result<(), CliError> {
    let mut out = io::stdout();
    match auth.current_user(now) {
        Some(user) => writeln!(out, "{} - {} ({})", user.username, user.name, user.role)?,
        None => writeln!(out, "Not signed in")?,
    }
    Ok(())
}

/// Print an Argon2 hash of the given password.
pub fn hash_password() -> Result<(), CliError> {
    let password = read_password()?;
    let hash = auth_service::hash_password(&password)?;
    writeln!(io::stdout(), "{hash}")?;
    Ok(())
}

fn read_password() -> Result<SecretString, CliError> {
    if let Ok(password) = std::env::var(PASSWORD_ENV) {
        return non_empty_password(&password);
    }
    read_password_from(io::stdin().lock())
}

fn read_password_from<R: BufRead>(mut input: R) -> Result<SecretString, CliError> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    non_empty_password(line.trim_end_matches(['\r', '\n']))
}

fn non_empty_password(password: &str) -> Result<SecretString, CliError> {
    if password.is_empty() {
        return Err(AuthError::MissingCredentials.into());
    }
    Ok(SecretString::from(password.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_read_password_strips_newline() {
        let password = read_password_from("s3cret pass\r\n".as_bytes()).unwrap();
        assert_eq!(password.expose_secret(), "s3cret pass");
    }

    #[test]
    fn test_read_password_empty() {
        assert!(matches!(
            read_password_from("\n".as_bytes()),
            Err(CliError::Auth(AuthError::MissingCredentials))
        ));
    }

    #[test]
    fn test_empty_env_password_rejected() {
        assert!(matches!(
            non_empty_password(""),
            Err(CliError::Auth(AuthError::MissingCredentials))
        ));
        assert_eq!(non_empty_password("pw").unwrap().expose_secret(), "pw");
    }
}
