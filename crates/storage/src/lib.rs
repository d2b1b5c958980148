//! `lumina-storage` — the local key-value document store.
//!
//! The storefront persists a handful of flat JSON documents (cart, session,
//! account directory, last order) under application-specific keys, the way
//! a browser keeps them in local storage. Reads degrade: a missing or
//! corrupt document is `None`, logged and never fatal.

pub mod keys;
pub mod store;

pub use keys::StoreKeys;
pub use store::{DocumentStore, FileStore, MemoryStore, Store};
