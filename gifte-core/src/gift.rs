//! Gift suggestion and confidence scoring
//!
//! Scans the normalized social signal for interest keywords and follower
//! reach. Categories are static data evaluated in table order; the first
//! match names the gift and every match adds to the score.

use serde::Serialize;

use crate::NormalizedSocialProfile;

/// Score when no profile record was available
pub const NO_PROFILE_SCORE: u8 = 30;

/// Starting score for a usable profile
pub const BASE_SCORE: u8 = 50;

/// Upper bound on any score
pub const MAX_SCORE: u8 = 100;

/// Gift when no profile record was available
pub const NO_PROFILE_GIFT: &str = "Custom Gift";

/// Gift when a usable profile matched nothing
pub const FALLBACK_GIFT: &str = "Personalized Mug";

/// An interest category the text signal is scanned for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeywordCategory {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub gift: &'static str,
    pub delta: u8,
}

impl KeywordCategory {
    pub fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|keyword| text.contains(keyword))
    }
}

/// A follower-count threshold (exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FollowerTier {
    pub min_followers: u64,
    pub gift: &'static str,
    pub delta: u8,
}

/// Interest categories, in priority order
pub static KEYWORD_CATEGORIES: &[KeywordCategory] = &[
    KeywordCategory {
        name: "travel",
        keywords: &["travel", "wanderlust", "passport"],
        gift: "Travel Backpack",
        delta: 18,
    },
    KeywordCategory {
        name: "food",
        keywords: &["food", "chef", "cook", "recipe"],
        gift: "Gourmet Spice Set",
        delta: 15,
    },
    KeywordCategory {
        name: "fitness",
        keywords: &["gym", "fitness", "workout"],
        gift: "Fitness Tracker",
        delta: 16,
    },
    KeywordCategory {
        name: "reading",
        keywords: &["book", "read", "novel"],
        gift: "Bestseller Bundle",
        delta: 12,
    },
    KeywordCategory {
        name: "music",
        keywords: &["music", "guitar", "concert"],
        gift: "Wireless Earbuds",
        delta: 14,
    },
];

/// Follower tiers, highest first; at most one applies
pub static FOLLOWER_TIERS: &[FollowerTier] = &[
    FollowerTier {
        min_followers: 50_000,
        gift: "Luxury Watch",
        delta: 20,
    },
    FollowerTier {
        min_followers: 10_000,
        gift: "Premium Headphones",
        delta: 12,
    },
];

/// Outcome of the heuristic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GiftScore {
    pub gift: String,
    pub score: u8,
    /// Every matched trait, in evaluation order
    pub matched: Vec<&'static str>,
}

/// Derive a gift suggestion and score from a normalized profile
pub fn score_profile(profile: &NormalizedSocialProfile) -> GiftScore {
    if !profile.is_usable() {
        return GiftScore {
            gift: NO_PROFILE_GIFT.to_string(),
            score: NO_PROFILE_SCORE,
            matched: Vec::new(),
        };
    }

    let text = profile.text_signal();
    let mut score = u32::from(BASE_SCORE);
    let mut matched = Vec::new();

    for category in KEYWORD_CATEGORIES.iter().filter(|c| c.matches(&text)) {
        matched.push(category.gift);
        score += u32::from(category.delta);
    }

    if let Some(followers) = profile.follower_count {
        if let Some(tier) = FOLLOWER_TIERS.iter().find(|t| followers > t.min_followers) {
            matched.push(tier.gift);
            score += u32::from(tier.delta);
        }
    }

    let gift = matched.first().copied().unwrap_or(FALLBACK_GIFT).to_string();
    let score = score.min(u32::from(MAX_SCORE)) as u8;

    GiftScore {
        gift,
        score,
        matched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize_payload;
    use serde_json::json;

    fn profile(bio: &str, followers: Option<u64>) -> NormalizedSocialProfile {
        NormalizedSocialProfile {
            biography: bio.to_string(),
            follower_count: followers,
            has_record: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_no_profile() {
        let result = score_profile(&NormalizedSocialProfile::empty());
        assert_eq!(result.gift, "Custom Gift");
        assert_eq!(result.score, 30);
    }

    #[test]
    fn test_usable_empty_profile() {
        let result = score_profile(&profile("", None));
        assert_eq!(result.gift, "Personalized Mug");
        assert_eq!(result.score, 50);
        assert!(result.matched.is_empty());
    }

    #[test]
    fn test_travel_and_cooking() {
        let result = score_profile(&profile("love to travel and cook", None));
        assert_eq!(result.matched, vec!["Travel Backpack", "Gourmet Spice Set"]);
        assert_eq!(result.gift, "Travel Backpack");
        assert_eq!(result.score, 83);
    }

    #[test]
    fn test_keywords_take_priority_over_followers() {
        let result = score_profile(&profile("weekend guitar sessions", Some(75_000)));
        assert_eq!(result.gift, "Wireless Earbuds");
        assert_eq!(result.matched, vec!["Wireless Earbuds", "Luxury Watch"]);
        assert_eq!(result.score, 84);
    }

    #[test]
    fn test_follower_tiers() {
        assert_eq!(score_profile(&profile("", Some(50_001))).gift, "Luxury Watch");
        assert_eq!(score_profile(&profile("", Some(50_000))).gift, "Premium Headphones");
        assert_eq!(score_profile(&profile("", Some(10_001))).score, 62);
        assert_eq!(score_profile(&profile("", Some(10_000))).gift, "Personalized Mug");
    }

    #[test]
    fn test_score_is_capped() {
        let bio = "travel food gym books music";
        let result = score_profile(&profile(bio, Some(1_000_000)));
        assert_eq!(result.matched.len(), 6);
        assert_eq!(result.score, 100);
    }

    #[test]
    fn test_caption_text_contributes() {
        let mut p = profile("", None);
        p.caption_text = "Morning Workout".to_string();
        assert_eq!(score_profile(&p).gift, "Fitness Tracker");
    }

    #[test]
    fn test_malformed_follower_count() {
        let p = normalize_payload(&json!({"biography": "hello", "follower_count": "99999"}));
        let result = score_profile(&p);
        assert_eq!(result.gift, "Personalized Mug");
        assert_eq!(result.score, 50);
    }

    #[test]
    fn test_categories_match_independently() {
        for category in KEYWORD_CATEGORIES {
            let result = score_profile(&profile(category.keywords[0], None));
            assert_eq!(result.gift, category.gift, "category {}", category.name);
            assert_eq!(result.score, BASE_SCORE + category.delta);
        }
    }
}
