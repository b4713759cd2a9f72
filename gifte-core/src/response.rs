//! The aggregated identity profile returned for one request

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{NormalizedSocialProfile, ProviderResult};

/// Social-profile lookup with its normalized view
#[derive(Debug, Clone, Serialize)]
pub struct SocialSection {
    pub lookup: ProviderResult,
    pub profile: NormalizedSocialProfile,
}

/// Discovered public IP and its geolocation
#[derive(Debug, Clone, Serialize)]
pub struct IpBlock {
    /// Discovered address, or `"unknown"`
    pub address: String,
    pub discovery: ProviderResult,
    pub geo: ProviderResult,
}

/// Best-effort aggregate of every provider lookup for one identity
#[derive(Debug, Clone, Serialize)]
pub struct AggregatedResponse {
    pub request_id: Uuid,
    pub generated_at: DateTime<Utc>,
    /// Email validity results, primary provider first
    pub email: Vec<ProviderResult>,
    /// Phone validity results, primary provider first
    pub phone: Vec<ProviderResult>,
    pub caller_id: ProviderResult,
    pub social: SocialSection,
    pub ip: IpBlock,
    pub dorks: Vec<String>,
    pub gift: String,
    /// Confidence score in `0..=100`
    pub score: u8,
    pub trace: Vec<String>,
}

impl AggregatedResponse {
    /// Every provider result in the aggregate
    pub fn provider_results(&self) -> impl Iterator<Item = &ProviderResult> {
        self.email
            .iter()
            .chain(self.phone.iter())
            .chain([
                &self.caller_id,
                &self.social.lookup,
                &self.ip.discovery,
                &self.ip.geo,
            ])
    }

    /// Number of provider lookups that failed
    pub fn failed_count(&self) -> usize {
        self.provider_results().filter(|r| !r.is_ok()).count()
    }
}
