//! `lumina-auth` — the local account directory and session.
//!
//! This is the demo-shop account model: a flat directory of registered
//! accounts persisted alongside the cart, and a session document for the
//! signed-in user. It is deliberately not an authentication
//! infrastructure — no tokens, no server, no rate limiting. Passwords
//! are still salted and digested; even a demo directory is no place for
//! plaintext.

pub mod account;
pub mod password;
pub mod session;

pub use account::{AccountDirectory, Registration, UserAccount};
pub use password::PasswordDigest;
pub use session::Session;
