//! Social-profile normalization
//!
//! Social providers disagree on response shape: some answer with a flat
//! object, some wrap it in a `data` envelope, some send a `data` object with
//! none of the expected fields. [`normalize_social`] reduces all of them to a
//! [`NormalizedSocialProfile`]. Fields of the wrong type fall back to their
//! empty default; nothing here fails.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::ProviderResult;

/// Keys the normalizer recognizes as profile content
const PROFILE_KEYS: &[&str] = &[
    "biography",
    "bio",
    "captions",
    "media",
    "posts",
    "caption_text",
    "follower_count",
    "followers",
    "edge_followed_by",
];

/// Stable view of a social profile, whatever the provider sent
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedSocialProfile {
    pub biography: String,
    pub caption_text: String,
    pub follower_count: Option<u64>,
    /// Original payload, kept for diagnostics
    pub raw: Value,
    /// Whether the payload held a profile record at all
    pub has_record: bool,
}

impl NormalizedSocialProfile {
    /// Profile for a failed or missing lookup
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the heuristic engine has anything to work with
    pub fn is_usable(&self) -> bool {
        self.has_record
    }

    /// Lowercased biography and caption text, space separated
    pub fn text_signal(&self) -> String {
        format!("{} {}", self.biography, self.caption_text).to_lowercase()
    }
}

/// Normalize the social-profile lookup result
pub fn normalize_social(result: &ProviderResult) -> NormalizedSocialProfile {
    match result.payload() {
        Some(payload) => normalize_payload(payload),
        None => NormalizedSocialProfile::empty(),
    }
}

/// Normalize a raw social-profile payload
pub fn normalize_payload(payload: &Value) -> NormalizedSocialProfile {
    let Some(record) = unwrap_data(payload).as_object() else {
        return NormalizedSocialProfile {
            raw: payload.clone(),
            ..Default::default()
        };
    };

    NormalizedSocialProfile {
        biography: biography(record),
        caption_text: caption_text(record),
        follower_count: follower_count(record),
        raw: payload.clone(),
        has_record: PROFILE_KEYS.iter().any(|key| record.contains_key(*key)),
    }
}

/// Strip at most one `data` envelope
fn unwrap_data(payload: &Value) -> &Value {
    match payload.get("data") {
        Some(inner) if inner.is_object() => inner,
        _ => payload,
    }
}

fn biography(record: &Map<String, Value>) -> String {
    ["biography", "bio"]
        .iter()
        .find_map(|key| record.get(*key).and_then(Value::as_str))
        .unwrap_or_default()
        .to_string()
}

fn caption_text(record: &Map<String, Value>) -> String {
    if let Some(captions) = record.get("captions").and_then(Value::as_array) {
        return join_strings(captions.iter().filter_map(Value::as_str));
    }

    for key in ["media", "posts"] {
        if let Some(items) = record.get(key).and_then(Value::as_array) {
            return join_strings(
                items
                    .iter()
                    .filter_map(|item| item.get("caption").and_then(Value::as_str)),
            );
        }
    }

    record
        .get("caption_text")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn join_strings<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn follower_count(record: &Map<String, Value>) -> Option<u64> {
    record
        .get("follower_count")
        .or_else(|| record.get("followers"))
        .and_then(as_count)
        .or_else(|| {
            record
                .get("edge_followed_by")
                .and_then(|edge| edge.get("count"))
                .and_then(as_count)
        })
}

/// Non-negative number, truncated to an integer
fn as_count(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|n| n.is_finite() && *n >= 0.0)
            .map(|n| n as u64)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProviderKind;
    use serde_json::json;

    #[test]
    fn test_flat_shape() {
        let profile = normalize_payload(&json!({
            "biography": "Chef and traveller",
            "follower_count": 12000,
            "captions": ["Sunset in Lisbon", "  ", "Fresh pasta"]
        }));

        assert!(profile.is_usable());
        assert_eq!(profile.biography, "Chef and traveller");
        assert_eq!(profile.caption_text, "Sunset in Lisbon Fresh pasta");
        assert_eq!(profile.follower_count, Some(12000));
    }

    #[test]
    fn test_data_envelope() {
        let profile = normalize_payload(&json!({
            "data": {
                "bio": "Bookworm",
                "media": [{"caption": "Reading list"}, {"id": 3}],
                "edge_followed_by": {"count": 60000}
            }
        }));

        assert!(profile.is_usable());
        assert_eq!(profile.biography, "Bookworm");
        assert_eq!(profile.caption_text, "Reading list");
        assert_eq!(profile.follower_count, Some(60000));
    }

    #[test]
    fn test_only_one_envelope_is_unwrapped() {
        let profile = normalize_payload(&json!({
            "data": {"data": {"biography": "too deep"}}
        }));

        assert!(!profile.is_usable());
        assert_eq!(profile.biography, "");
    }

    #[test]
    fn test_data_without_fields() {
        let profile = normalize_payload(&json!({"data": {"status": "private"}}));
        assert!(!profile.is_usable());
        assert_eq!(profile.follower_count, None);
        assert_eq!(profile.raw["data"]["status"], "private");
    }

    #[test]
    fn test_wrong_types_fall_back() {
        let profile = normalize_payload(&json!({
            "biography": 42,
            "follower_count": "12k",
            "captions": "not a list"
        }));

        assert!(profile.is_usable());
        assert_eq!(profile.biography, "");
        assert_eq!(profile.caption_text, "");
        assert_eq!(profile.follower_count, None);
    }

    #[test]
    fn test_follower_count_numbers() {
        let profile = normalize_payload(&json!({"followers": 15000.0}));
        assert_eq!(profile.follower_count, Some(15000));

        let profile = normalize_payload(&json!({"followers": -3}));
        assert_eq!(profile.follower_count, None);
    }

    #[test]
    fn test_non_object_payloads() {
        assert!(!normalize_payload(&json!([1, 2, 3])).is_usable());
        assert!(!normalize_payload(&json!("profile")).is_usable());
        assert!(!normalize_payload(&json!({"data": null})).is_usable());
    }

    #[test]
    fn test_failed_lookup() {
        let result = ProviderResult::failed(ProviderKind::SocialProfile, "HTTP 404");
        let profile = normalize_social(&result);
        assert_eq!(profile, NormalizedSocialProfile::empty());
    }

    #[test]
    fn test_text_signal() {
        let profile = normalize_payload(&json!({"biography": "Love To TRAVEL", "caption_text": "Gym"}));
        assert_eq!(profile.text_signal(), "love to travel gym");
    }
}
