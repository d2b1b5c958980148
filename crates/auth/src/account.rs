//! The registered-account directory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lumina_core::{AccountId, DomainError, DomainResult};

use crate::password::PasswordDigest;

/// A registered account, one entry in the persisted directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: AccountId,
    /// Lowercased; unique within the directory.
    pub email: String,
    pub name: String,
    pub password: PasswordDigest,
    pub registered_at: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
}

/// A registration form as submitted.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub accepted_terms: bool,
}

/// The flat list of registered accounts.
///
/// Persisted as-is under the accounts store key; the caller owns loading
/// and saving so this stays a pure state machine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountDirectory {
    accounts: Vec<UserAccount>,
}

impl AccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accounts(&self) -> &[UserAccount] {
        &self.accounts
    }

    pub fn find(&self, email: &str) -> Option<&UserAccount> {
        let email = normalize_email(email);
        self.accounts.iter().find(|a| a.email == email)
    }

    /// Register a new account and return it.
    ///
    /// Validation order matches the registration form: password match,
    /// password length, terms, then the duplicate-email check.
    pub fn register(&mut self, form: Registration, now: DateTime<Utc>) -> DomainResult<&UserAccount> {
        let name = form.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("full name is required"));
        }
        let email = normalize_email(&form.email);
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::validation("invalid email address"));
        }
        if form.password != form.confirm_password {
            return Err(DomainError::validation("passwords do not match"));
        }
        if form.password.len() < 6 {
            return Err(DomainError::validation(
                "password must be at least 6 characters long",
            ));
        }
        if !form.accepted_terms {
            return Err(DomainError::validation(
                "please accept the terms & conditions",
            ));
        }
        if self.find(&email).is_some() {
            return Err(DomainError::conflict("email already registered"));
        }

        self.accounts.push(UserAccount {
            id: AccountId::new(),
            email,
            name: name.to_string(),
            password: PasswordDigest::create(&form.password),
            registered_at: now,
            last_login: now,
        });
        Ok(self.accounts.last().expect("just pushed"))
    }

    /// Authenticate and record the login time.
    pub fn login(
        &mut self,
        email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<&UserAccount> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(DomainError::validation(
                "please enter both email and password",
            ));
        }

        let account = self
            .accounts
            .iter_mut()
            .find(|a| a.email == email)
            .ok_or(DomainError::NotFound)?;

        if !account.password.verify(password) {
            return Err(DomainError::Unauthorized);
        }

        account.last_login = now;
        Ok(&*account)
    }

    /// Whether a password-reset link could be sent (mock: existence check).
    pub fn can_reset(&self, email: &str) -> bool {
        self.find(email).is_some()
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
