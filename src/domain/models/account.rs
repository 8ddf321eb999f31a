use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{error::EmailError, models::credential::HashedPassword};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(Uuid);

impl AccountId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Normalized email address.
///
/// Surrounding whitespace is trimmed and the whole address is lowercased, so
/// `A@Example.COM` and `a@example.com` identify the same account.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// RFC 5321 forward-path limit; also the width of the `accounts.email` column.
    pub const MAX_LENGTH: usize = 254;

    /// Normalize and check an address: an unquoted RFC 5322 addr-spec of at
    /// most `MAX_LENGTH` characters whose domain is a host name (no `[...]`
    /// literal) with at least one dot and non-empty labels on both sides.
    pub fn parse(raw: &str) -> Result<Self, EmailError> {
        let normalized = raw.trim().to_lowercase();

        if normalized.chars().count() > Self::MAX_LENGTH
            || normalized.contains(char::is_whitespace)
            || normalized.contains(['<', '>'])
            || email_address::EmailAddress::from_str(&normalized).is_err()
        {
            return Err(EmailError::InvalidFormat(normalized));
        }

        match normalized.rsplit_once('@') {
            Some((local, domain))
                if is_dot_atom_local(local) && has_dotted_domain(domain) =>
            {
                Ok(Self(normalized))
            }
            _ => Err(EmailError::InvalidFormat(normalized)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// quoted local parts are valid RFC 5322 but not accepted here
fn is_dot_atom_local(local: &str) -> bool {
    !local.is_empty() && !local.contains('"')
}

fn has_dotted_domain(domain: &str) -> bool {
    !domain.starts_with('[')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

/// Persisted account. Created once per successful registration and never
/// mutated by the signup flow.
#[derive(Debug, Clone)]
pub struct Account {
    id: AccountId,
    email: EmailAddress,
    password_hash: HashedPassword,
    created_at: DateTime<Utc>,
}

impl Account {
    pub fn reconstruct(
        id: AccountId,
        email: EmailAddress,
        password_hash: HashedPassword,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            password_hash,
            created_at,
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password_hash(&self) -> &HashedPassword {
        &self.password_hash
    }
}

/// Public fields of an account, safe to hand back to a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredAccount {
    pub id: AccountId,
    pub email: EmailAddress,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for RegisteredAccount {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            email: account.email,
            created_at: account.created_at,
        }
    }
}
