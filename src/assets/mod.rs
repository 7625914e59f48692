//! Write-once memoization of generated assets, shared across views.

pub mod cache;

pub use cache::{Asset, AssetCache, EnsureOutcome};
