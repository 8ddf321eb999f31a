use std::fmt;

use crate::domain::models::account::EmailAddress;

/// Value object representing a hashed password
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Create a new HashedPassword from an already hashed string
    pub fn new(hash: String) -> Self {
        Self(hash)
    }

    /// Get the hash as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashedPassword(..)")
    }
}

/// Raw signup submission. Lives for the duration of one request.
#[derive(Clone, Default)]
pub struct CredentialInput {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl fmt::Debug for CredentialInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialInput")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Credentials that passed every validation rule.
pub struct ValidatedCredential {
    email: EmailAddress,
    password: String,
}

impl ValidatedCredential {
    pub(crate) fn new(email: EmailAddress, password: String) -> Self {
        Self { email, password }
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn into_parts(self) -> (EmailAddress, String) {
        (self.email, self.password)
    }
}

impl fmt::Debug for ValidatedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedCredential")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}
