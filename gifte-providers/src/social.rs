//! Social-profile metadata provider
//!
//! One social lookup is three concurrent `POST`s with `{"username": ..}`:
//! - `{base}/instagram/web_profile_info`: the profile record
//! - `{base}/instagram/media`: recent posts, for caption text
//! - `{base}/instagram/followers`: follower list, for a follower count
//!
//! The target is the handle when one was supplied, otherwise the lowercased
//! local part of the email. [`merge_social`] folds the three into one
//! `SocialProfile` result; see `gifte_core::normalize_social` for the shapes
//! the merged record may take.

use gifte_core::{normalize_payload, ProviderKind, ProviderResult, ValidatedIdentity};
use gifte_net::{EndpointConfig, ProviderSpec};
use serde_json::{json, Map, Value};
use tracing::debug;

/// Record keys that already carry caption text
const CAPTION_KEYS: &[&str] = &["captions", "media", "posts", "caption_text"];

/// Record keys that already carry a follower count
const FOLLOWER_KEYS: &[&str] = &["follower_count", "followers", "edge_followed_by"];

/// The three calls behind one social lookup
#[derive(Debug, Clone, PartialEq)]
pub struct SocialLookup {
    pub profile: ProviderSpec,
    pub media: ProviderSpec,
    pub followers: ProviderSpec,
}

fn social_call(endpoint: &EndpointConfig, identity: &ValidatedIdentity, path: &str) -> ProviderSpec {
    ProviderSpec::post(
        ProviderKind::SocialProfile,
        endpoint.url(path),
        json!({ "username": identity.social_target() }),
    )
    .header("Authorization", endpoint.key())
    .header("Content-Type", "application/json")
}

pub fn social_profile(endpoint: &EndpointConfig, identity: &ValidatedIdentity) -> ProviderSpec {
    social_call(endpoint, identity, "/instagram/web_profile_info")
}

pub fn social_lookup(endpoint: &EndpointConfig, identity: &ValidatedIdentity) -> SocialLookup {
    SocialLookup {
        profile: social_profile(endpoint, identity),
        media: social_call(endpoint, identity, "/instagram/media"),
        followers: social_call(endpoint, identity, "/instagram/followers"),
    }
}

/// Fold the media and follower lookups into the profile result.
///
/// The profile decides the outcome: when it failed or holds no usable record
/// it is returned as is. Otherwise media items fill `media` and the follower
/// list length fills `follower_count`, each only when the profile record has
/// no such field of its own. Failed sub-lookups are dropped.
pub fn merge_social(
    profile: ProviderResult,
    media: ProviderResult,
    followers: ProviderResult,
) -> ProviderResult {
    let elapsed_ms = profile
        .elapsed_ms
        .max(media.elapsed_ms)
        .max(followers.elapsed_ms);

    let record = profile
        .payload()
        .filter(|payload| normalize_payload(payload).is_usable())
        .and_then(record_of)
        .cloned();
    let Some(mut record) = record else {
        return profile.with_elapsed_ms(elapsed_ms);
    };

    if !has_any(&record, CAPTION_KEYS) {
        if let Some(items) = media.payload().and_then(listing) {
            debug!("Social media lookup added {} posts", items.len());
            record.insert("media".to_string(), Value::Array(items.clone()));
        }
    }
    if !has_any(&record, FOLLOWER_KEYS) {
        if let Some(items) = followers.payload().and_then(listing) {
            debug!("Social followers lookup counted {}", items.len());
            record.insert("follower_count".to_string(), json!(items.len()));
        }
    }

    ProviderResult::ok(ProviderKind::SocialProfile, Value::Object(record)).with_elapsed_ms(elapsed_ms)
}

/// The profile object, inside at most one `data` envelope
fn record_of(payload: &Value) -> Option<&Map<String, Value>> {
    match payload.get("data") {
        Some(Value::Object(inner)) => Some(inner),
        _ => payload.as_object(),
    }
}

/// A list response: a bare array or one under `data`
fn listing(payload: &Value) -> Option<&Vec<Value>> {
    payload
        .as_array()
        .or_else(|| payload.get("data").and_then(Value::as_array))
}

fn has_any(record: &Map<String, Value>, keys: &[&str]) -> bool {
    keys.iter().any(|key| record.contains_key(*key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gifte_core::{normalize_social, IdentityRequest};

    #[test]
    fn test_target_defaults_to_local_part() {
        let identity = IdentityRequest::new("Jane.Doe@example.com", "5550109999")
            .validate()
            .unwrap();
        let endpoint = EndpointConfig::new("https://social.test").with_key("Basic abc");
        let spec = social_profile(&endpoint, &identity);

        assert_eq!(spec.url, "https://social.test/instagram/web_profile_info");
        assert_eq!(spec.body, Some(json!({"username": "jane.doe"})));
        assert!(spec
            .headers
            .contains(&("Authorization".to_string(), "Basic abc".to_string())));
    }

    #[test]
    fn test_target_prefers_handle() {
        let identity = IdentityRequest::new("jane@example.com", "5550109999")
            .with_handle("jane.travels")
            .validate()
            .unwrap();
        let spec = social_profile(&EndpointConfig::new("https://social.test"), &identity);
        assert_eq!(spec.body, Some(json!({"username": "jane.travels"})));
    }

    #[test]
    fn test_lookup_paths() {
        let identity = IdentityRequest::new("jane@example.com", "5550109999")
            .validate()
            .unwrap();
        let lookup = social_lookup(&EndpointConfig::new("https://social.test"), &identity);

        assert_eq!(lookup.media.url, "https://social.test/instagram/media");
        assert_eq!(lookup.followers.url, "https://social.test/instagram/followers");
        assert_eq!(lookup.media.body, lookup.profile.body);
        assert_eq!(lookup.followers.kind, ProviderKind::SocialProfile);
    }

    fn ok(payload: Value, elapsed_ms: u64) -> ProviderResult {
        ProviderResult::ok(ProviderKind::SocialProfile, payload).with_elapsed_ms(elapsed_ms)
    }

    fn failed() -> ProviderResult {
        ProviderResult::failed(ProviderKind::SocialProfile, "HTTP 500")
    }

    #[test]
    fn test_merge_fills_captions_and_followers() {
        let merged = merge_social(
            ok(json!({"data": {"biography": "just me"}}), 40),
            ok(json!({"data": [{"caption": "travel diary"}, {"caption": "new recipe"}]}), 90),
            ok(json!({"data": [{"id": 1}, {"id": 2}, {"id": 3}]}), 60),
        );

        assert_eq!(merged.elapsed_ms, 90);
        let profile = normalize_social(&merged);
        assert_eq!(profile.biography, "just me");
        assert_eq!(profile.caption_text, "travel diary new recipe");
        assert_eq!(profile.follower_count, Some(3));
    }

    #[test]
    fn test_merge_prefers_profile_fields() {
        let merged = merge_social(
            ok(json!({"biography": "chef", "captions": ["pasta"], "follower_count": 20_000}), 10),
            ok(json!([{"caption": "ignored"}]), 10),
            ok(json!({"data": [{"id": 1}]}), 10),
        );

        let profile = normalize_social(&merged);
        assert_eq!(profile.caption_text, "pasta");
        assert_eq!(profile.follower_count, Some(20_000));
    }

    #[test]
    fn test_failed_sub_lookups_are_dropped() {
        let merged = merge_social(ok(json!({"bio": "hi"}), 10), failed(), failed());
        assert_eq!(merged.payload(), Some(&json!({"bio": "hi"})));
    }

    #[test]
    fn test_profile_decides_outcome() {
        let merged = merge_social(
            failed().with_elapsed_ms(5),
            ok(json!({"data": [{"caption": "travel"}]}), 30),
            ok(json!({"data": []}), 10),
        );
        assert_eq!(merged.failure_reason(), Some("HTTP 500"));
        assert_eq!(merged.elapsed_ms, 30);

        let empty = ok(json!({"data": {"status": "private"}}), 10);
        let merged = merge_social(empty.clone(), ok(json!([{"caption": "travel"}]), 10), failed());
        assert_eq!(merged.payload(), empty.payload());
        assert!(!normalize_social(&merged).is_usable());
    }
}
