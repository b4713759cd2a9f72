//! Gifte+ Providers
//!
//! One request builder per external lookup provider:
//! - **Email**: two independent validity providers
//! - **Phone**: two validity providers plus a credential-gated caller-ID lookup
//! - **Social**: profile metadata for a handle
//! - **IP**: public IP discovery and reverse geolocation
//!
//! [`ProviderCatalog`] assembles them into the calls for one request.

pub mod email;
pub mod phone;
pub mod social;
pub mod ip;
pub mod catalog;

pub use email::*;
pub use phone::*;
pub use social::*;
pub use ip::*;
pub use catalog::*;
