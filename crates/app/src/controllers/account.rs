//! Login, registration, and the account page.

use chrono::Utc;
use serde::Serialize;

use lumina_auth::{Registration, Session};
use lumina_core::{DomainError, DomainResult};

use crate::state::SharedState;

/// What the account page renders for a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountPageViewModel {
    /// Single-letter avatar badge.
    pub avatar_initial: String,
    pub display_name: String,
    pub email: String,
}

/// Login, registration, logout and the account page.
pub struct AccountController {
    state: SharedState,
}

impl AccountController {
    pub fn new(state: SharedState) -> Self {
        Self { state }
    }

    pub fn current_session(&self) -> Option<Session> {
        self.state.session()
    }

    /// Register a new account. Success signs the user in immediately.
    pub fn register(&self, form: Registration) -> DomainResult<Session> {
        let mut directory = self.state.accounts();
        let now = Utc::now();
        let session = {
            let account = directory.register(form, now)?;
            tracing::info!(email = %account.email, "account registered");
            Session::start(account, now, false)
        };
        self.state.save_accounts(&directory);
        self.state.save_session(&session);
        Ok(session)
    }

    pub fn login(&self, email: &str, password: &str, remember_me: bool) -> DomainResult<Session> {
        let mut directory = self.state.accounts();
        let now = Utc::now();
        let session = {
            let account = directory.login(email, password, now)?;
            tracing::info!(email = %account.email, "login");
            Session::start(account, now, remember_me)
        };
        // The directory changed too: last_login was updated.
        self.state.save_accounts(&directory);
        self.state.save_session(&session);
        Ok(session)
    }

    pub fn logout(&self) {
        self.state.clear_session();
        tracing::info!("logout");
    }

    /// The account page requires a session; `NotFound` means "redirect
    /// to the login page".
    pub fn account_page(&self) -> DomainResult<AccountPageViewModel> {
        let session = self.state.session().ok_or(DomainError::NotFound)?;
        let display_name = session.display_name().to_string();
        Ok(AccountPageViewModel {
            avatar_initial: display_name
                .chars()
                .next()
                .map(|c| c.to_uppercase().to_string())
                .unwrap_or_default(),
            display_name,
            email: session.email,
        })
    }

    /// Mock forgot-password flow: succeeds only for registered emails.
    pub fn request_password_reset(&self, email: &str) -> DomainResult<()> {
        if email.trim().is_empty() {
            return Err(DomainError::validation(
                "please enter your email address first",
            ));
        }
        if !self.state.accounts().can_reset(email) {
            return Err(DomainError::NotFound);
        }
        tracing::info!("password reset link sent (mock)");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumina_storage::{Store, StoreKeys};

    fn controller() -> AccountController {
        AccountController::new(SharedState::new(Store::memory(), StoreKeys::default()))
    }

    fn registration(email: &str) -> Registration {
        Registration {
            name: "Alice Smith".to_string(),
            email: email.to_string(),
            password: "secret6".to_string(),
            confirm_password: "secret6".to_string(),
            accepted_terms: true,
        }
    }

    #[test]
    fn register_signs_in_immediately() {
        let controller = controller();
        let session = controller.register(registration("alice@example.com")).unwrap();
        assert_eq!(session.email, "alice@example.com");
        assert!(controller.current_session().is_some());
    }

    #[test]
    fn login_after_logout_round_trips() {
        let controller = controller();
        controller.register(registration("alice@example.com")).unwrap();
        controller.logout();
        assert!(controller.current_session().is_none());

        let session = controller.login("Alice@Example.com", "secret6", true).unwrap();
        assert!(session.remember_me);
        assert!(controller.current_session().is_some());
    }

    #[test]
    fn login_failures_leave_the_session_signed_out() {
        let controller = controller();
        controller.register(registration("alice@example.com")).unwrap();
        controller.logout();

        assert_eq!(
            controller.login("alice@example.com", "wrong", false).unwrap_err(),
            DomainError::Unauthorized
        );
        assert_eq!(
            controller.login("ghost@example.com", "secret6", false).unwrap_err(),
            DomainError::NotFound
        );
        assert!(controller.current_session().is_none());
    }

    #[test]
    fn account_page_requires_a_session() {
        let controller = controller();
        assert_eq!(controller.account_page().unwrap_err(), DomainError::NotFound);

        controller.register(registration("alice@example.com")).unwrap();
        let page = controller.account_page().unwrap();
        assert_eq!(page.avatar_initial, "A");
        assert_eq!(page.display_name, "Alice Smith");
        assert_eq!(page.email, "alice@example.com");
    }

    #[test]
    fn password_reset_checks_the_directory() {
        let controller = controller();
        controller.register(registration("alice@example.com")).unwrap();

        assert!(controller.request_password_reset("alice@example.com").is_ok());
        assert_eq!(
            controller.request_password_reset("ghost@example.com").unwrap_err(),
            DomainError::NotFound
        );
        assert!(matches!(
            controller.request_password_reset("  "),
            Err(DomainError::Validation(_))
        ));
    }
}
