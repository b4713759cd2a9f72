//! Phone validity and caller-ID providers

use gifte_core::{ProviderKind, ValidatedIdentity};
use gifte_net::{EndpointConfig, ProviderSpec};
use serde_json::json;

/// Primary phone validity: `GET {base}/v1/?api_key=..&phone=+<digits>`
pub fn phone_validity_a(endpoint: &EndpointConfig, identity: &ValidatedIdentity) -> ProviderSpec {
    let url = format!(
        "{}?api_key={}&phone={}",
        endpoint.url("/v1/"),
        urlencoding::encode(endpoint.key()),
        urlencoding::encode(&identity.e164())
    );
    ProviderSpec::get(ProviderKind::PhoneValidityA, url)
}

/// Secondary phone validity: `GET {base}/api/validate?access_key=..&number=<digits>`
pub fn phone_validity_b(endpoint: &EndpointConfig, identity: &ValidatedIdentity) -> ProviderSpec {
    let url = format!(
        "{}?access_key={}&number={}",
        endpoint.url("/api/validate"),
        urlencoding::encode(endpoint.key()),
        identity.phone_digits()
    );
    ProviderSpec::get(ProviderKind::PhoneValidityB, url)
}

/// Caller-ID: `POST {base}/caller/lookup` with a bearer credential.
///
/// Returns `None` when the endpoint has no credential; the caller decides
/// what a skipped lookup looks like.
pub fn caller_id(endpoint: &EndpointConfig, identity: &ValidatedIdentity) -> Option<ProviderSpec> {
    if !endpoint.has_key() {
        return None;
    }

    let spec = ProviderSpec::post(
        ProviderKind::CallerId,
        endpoint.url("/caller/lookup"),
        json!({ "phone": identity.e164() }),
    )
    .header("Authorization", &format!("Bearer {}", endpoint.key()))
    .header("Content-Type", "application/json");

    Some(spec)
}
