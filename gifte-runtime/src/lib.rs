//! Gifte+ Runtime
//!
//! The aggregation engine: validates an identity, fans provider lookups out
//! concurrently, then normalizes, scores and assembles the profile.

pub mod aggregator;

pub use aggregator::*;
