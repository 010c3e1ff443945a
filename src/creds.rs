//! Transifex API credentials
//!
//! Credentials are resolved exactly once, before the client is constructed,
//! and are immutable for the life of the client. The credentials file format
//! itself is handled by the outer tooling; this module only consumes the two
//! resolved strings (or reads them from the environment).

use crate::error::{TransifexError, TransifexResult};

/// Username/password pair sent as HTTP basic auth on every remote call
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Create credentials from already-resolved strings
    ///
    /// # Returns
    ///
    /// * `Ok(Self)` - New credentials
    /// * `Err(TransifexError)` - If either field is empty
    pub fn new(username: String, password: String) -> TransifexResult<Self> {
        if username.trim().is_empty() {
            return Err(TransifexError::CredentialError(
                "Username cannot be empty".to_string(),
            ));
        }
        if password.trim().is_empty() {
            return Err(TransifexError::CredentialError(
                "Password cannot be empty".to_string(),
            ));
        }

        Ok(Self { username, password })
    }

    /// Create credentials from the `TRANSIFEX_USERNAME` and
    /// `TRANSIFEX_PASSWORD` environment variables
    pub fn from_env() -> TransifexResult<Self> {
        let username = std::env::var("TRANSIFEX_USERNAME").map_err(|_| {
            TransifexError::CredentialError(
                "TRANSIFEX_USERNAME environment variable not set".to_string(),
            )
        })?;
        let password = std::env::var("TRANSIFEX_PASSWORD").map_err(|_| {
            TransifexError::CredentialError(
                "TRANSIFEX_PASSWORD environment variable not set".to_string(),
            )
        })?;

        Self::new(username, password)
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_with_valid_fields() {
        let creds = Credentials::new("user".to_string(), "secret".to_string()).unwrap();
        assert_eq!(creds.username(), "user");
        assert_eq!(creds.password(), "secret");
    }

    #[test]
    fn test_new_with_empty_username() {
        let result = Credentials::new("".to_string(), "secret".to_string());
        match result {
            Err(TransifexError::CredentialError(msg)) => assert!(msg.contains("Username")),
            _ => panic!("Expected CredentialError"),
        }
    }

    #[test]
    fn test_new_with_empty_password() {
        let result = Credentials::new("user".to_string(), "   ".to_string());
        match result {
            Err(TransifexError::CredentialError(msg)) => assert!(msg.contains("Password")),
            _ => panic!("Expected CredentialError"),
        }
    }

    #[test]
    fn test_debug_masks_password() {
        let creds = Credentials::new("user".to_string(), "secret".to_string()).unwrap();
        let debug_str = format!("{:?}", creds);
        assert!(debug_str.contains("***"));
        assert!(!debug_str.contains("secret"));
    }
}
