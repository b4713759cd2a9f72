//! Gifte+ Network Layer
//!
//! Provides the outbound side of provider lookups:
//! - Provider configuration (base URLs, credentials, timeout)
//! - Call descriptions (`ProviderSpec`)
//! - reqwest-backed transport behind the `Transport` trait
//! - The provider client that folds every failure into a result

pub mod config;
pub mod spec;
pub mod transport;
pub mod client;

pub use config::*;
pub use spec::*;
pub use transport::*;
pub use client::*;
