//! Email validity providers
//!
//! Two independent providers are queried for the same address:
//! - Provider A: `GET {base}/v1/?api_key=..&email=..`
//! - Provider B: `GET {base}/api/check?access_key=..&email=..`

use gifte_core::{ProviderKind, ValidatedIdentity};
use gifte_net::{EndpointConfig, ProviderSpec};

pub fn email_validity_a(endpoint: &EndpointConfig, identity: &ValidatedIdentity) -> ProviderSpec {
    let url = format!(
        "{}?api_key={}&email={}",
        endpoint.url("/v1/"),
        urlencoding::encode(endpoint.key()),
        urlencoding::encode(identity.email())
    );
    ProviderSpec::get(ProviderKind::EmailValidityA, url)
}

pub fn email_validity_b(endpoint: &EndpointConfig, identity: &ValidatedIdentity) -> ProviderSpec {
    let url = format!(
        "{}?access_key={}&email={}",
        endpoint.url("/api/check"),
        urlencoding::encode(endpoint.key()),
        urlencoding::encode(identity.email())
    );
    ProviderSpec::get(ProviderKind::EmailValidityB, url)
}
