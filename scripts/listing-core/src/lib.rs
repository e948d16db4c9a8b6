//! Shared building blocks for the business-listing cleanup scripts.
//!
//! The scripts under `scripts/` are thin command-line drivers; everything that
//! is worth testing lives here as plain functions over explicit inputs:
//!
//! ```text
//! loader → profile(raw) → normalize → profile(clean) → grouping → engine → export
//!                                                                   ↑
//!                                                  wordlist ────────┘
//! ```

pub mod engine;
pub mod error;
pub mod export;
pub mod grouping;
pub mod loader;
pub mod logging;
pub mod normalize;
pub mod profile;
pub mod record;
pub mod rules;
pub mod similarity;
pub mod wordlist;

pub use error::{ListingError, Result};
pub use record::{Field, Record};
