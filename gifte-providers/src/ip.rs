//! Self-IP discovery and reverse geolocation
//!
//! Geolocation depends on the address discovered first, so these two
//! providers always run in sequence.

use gifte_core::{ProviderKind, ProviderResult};
use gifte_net::{EndpointConfig, ProviderSpec};
use std::net::IpAddr;

/// Public IP discovery: `GET {base}?format=json`
pub fn self_ip(endpoint: &EndpointConfig) -> ProviderSpec {
    ProviderSpec::get(ProviderKind::SelfIp, endpoint.url("?format=json"))
}

/// Reverse geolocation: `GET {base}/v1/?api_key=..&ip_address=..`
pub fn geolocation(endpoint: &EndpointConfig, ip: IpAddr) -> ProviderSpec {
    let url = format!(
        "{}?api_key={}&ip_address={}",
        endpoint.url("/v1/"),
        urlencoding::encode(endpoint.key()),
        urlencoding::encode(&ip.to_string())
    );
    ProviderSpec::get(ProviderKind::Geolocation, url)
}

/// Read the discovered address from a self-IP result's top-level `ip` field
pub fn discovered_ip(result: &ProviderResult) -> Option<IpAddr> {
    result
        .payload()?
        .get("ip")?
        .as_str()?
        .trim()
        .parse()
        .ok()
}
