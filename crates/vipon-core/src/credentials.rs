//! Account credentials for the promotion site.
//!
//! Credentials are read once at startup and handed to the session manager
//! explicitly. The password is wiped from memory on drop.

use crate::error::{ConfigError, ConfigResult};
use std::fmt;
use zeroize::Zeroizing;

/// Environment variable holding the account email.
pub const USERNAME_VAR: &str = "vipon_username";

/// Environment variable holding the account password.
pub const PASSWORD_VAR: &str = "vipon_password";

/// Username/password pair used to submit the login form.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Create credentials from explicit values.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Build credentials from a lookup keyed by `vipon_username` /
    /// `vipon_password`, e.g. CLI flags backed by the process environment.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let username = lookup(USERNAME_VAR).ok_or_else(|| ConfigError::MissingCredential {
            var: USERNAME_VAR.to_string(),
        })?;
        let password = lookup(PASSWORD_VAR).ok_or_else(|| ConfigError::MissingCredential {
            var: PASSWORD_VAR.to_string(),
        })?;
        tracing::debug!("Loaded credentials for {}", username);
        Ok(Self::new(username, password))
    }

    /// Account email.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Account password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            (USERNAME_VAR, "deals@example.com"),
            (PASSWORD_VAR, "hunter2"),
        ]
        .into_iter()
        .collect();

        let creds = Credentials::from_lookup(|k| vars.get(k).map(ToString::to_string))
            .expect("both variables present");
        assert_eq!(creds.username(), "deals@example.com");
        assert_eq!(creds.password(), "hunter2");
    }

    #[test]
    fn test_missing_password() {
        let err = Credentials::from_lookup(|k| {
            (k == USERNAME_VAR).then(|| "deals@example.com".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential { var } if var == PASSWORD_VAR));
    }

    #[test]
    fn test_debug_redacts_password() {
        let creds = Credentials::new("user", "secret-pass");
        let debug = format!("{creds:?}");
        assert!(debug.contains("user"));
        assert!(!debug.contains("secret-pass"));
    }
}
