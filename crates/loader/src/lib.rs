//! `lumina-loader` — one-shot catalog snapshot loading.
//!
//! A snapshot directory holds a category manifest (`categories.xml`), one
//! `<Category Name>.json` product file per category, and an optional
//! `reviews.json`. Loading is synchronous, one-shot, and never fatal: a
//! broken category file is skipped and recorded, and a missing manifest
//! degrades to the unavailable snapshot with its error flag set.

pub mod manifest;
pub mod reviews;
pub mod snapshot;

pub use manifest::read_manifest;
pub use reviews::{Review, ReviewDirectory, ReviewSummary};
pub use snapshot::{SnapshotLoad, SourceFailure, load_snapshot};
