//! The signed-in session document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::account::UserAccount;

/// What the header and the account page know about the signed-in user.
/// Persisted under the session store key; removed on logout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    pub name: String,
    pub login_time: DateTime<Utc>,
    #[serde(default)]
    pub remember_me: bool,
}

impl Session {
    pub fn start(account: &UserAccount, now: DateTime<Utc>, remember_me: bool) -> Self {
        Self {
            email: account.email.clone(),
            name: account.name.clone(),
            login_time: now,
            remember_me,
        }
    }

    /// The name shown in the header: the account name, or the email's
    /// local part when the name is blank.
    pub fn display_name(&self) -> &str {
        let name = self.name.trim();
        if !name.is_empty() {
            return name;
        }
        self.email.split('@').next().unwrap_or(&self.email)
    }

    /// A session only counts as signed-in with a usable email.
    pub fn is_valid(&self) -> bool {
        !self.email.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(name: &str, email: &str) -> Session {
        Session {
            email: email.to_string(),
            name: name.to_string(),
            login_time: Utc::now(),
            remember_me: false,
        }
    }

    #[test]
    fn display_name_prefers_the_account_name() {
        assert_eq!(session("Alice Smith", "alice@example.com").display_name(), "Alice Smith");
    }

    #[test]
    fn display_name_falls_back_to_the_email_local_part() {
        assert_eq!(session("", "alice@example.com").display_name(), "alice");
        assert_eq!(session("   ", "bob@shop.io").display_name(), "bob");
    }

    #[test]
    fn a_session_without_an_email_is_not_signed_in() {
        assert!(!session("Ghost", "").is_valid());
        assert!(session("", "a@b.co").is_valid());
    }
}
