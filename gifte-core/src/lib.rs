//! Gifte+ Core - Identity records and profile heuristics
//!
//! This crate holds the pure parts of identity-profile aggregation:
//! - Identity request validation
//! - Per-provider lookup results
//! - Social-profile normalization over inconsistent payload shapes
//! - Search-engine dork templates
//! - Gift suggestion and confidence scoring
//! - Diagnostic trace building

pub mod identity;
pub mod results;
pub mod profile;
pub mod dorks;
pub mod gift;
pub mod trace;
pub mod response;

pub use identity::*;
pub use results::*;
pub use profile::*;
pub use dorks::*;
pub use gift::*;
pub use trace::*;
pub use response::*;

/// Address reported when the caller's public IP could not be discovered
pub const UNKNOWN_IP: &str = "unknown";
