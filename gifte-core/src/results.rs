//! Per-provider lookup results
//!
//! Every provider call settles into exactly one [`ProviderResult`]. Failures
//! are values here, never errors: a provider that times out, answers with a
//! non-2xx status or returns garbage still produces a result.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Reason used when a provider is disabled or lacks credentials
pub const NOT_CONFIGURED: &str = "not configured";

/// Reason used for geolocation when the caller's IP could not be discovered
pub const IP_DETECTION_FAILED: &str = "ip detection failed";

/// External lookup providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Primary email validity provider
    EmailValidityA,
    /// Secondary email validity provider
    EmailValidityB,
    /// Primary phone validity provider
    PhoneValidityA,
    /// Secondary phone validity provider
    PhoneValidityB,
    /// Caller-ID lookup (credential gated)
    CallerId,
    /// Social-profile metadata
    SocialProfile,
    /// Discovery of the host's public IP
    SelfIp,
    /// Reverse geolocation of the discovered IP
    Geolocation,
}

impl ProviderKind {
    /// Providers queried concurrently in the first stage
    pub const STAGE_ONE: [ProviderKind; 7] = [
        ProviderKind::EmailValidityA,
        ProviderKind::EmailValidityB,
        ProviderKind::PhoneValidityA,
        ProviderKind::PhoneValidityB,
        ProviderKind::CallerId,
        ProviderKind::SocialProfile,
        ProviderKind::SelfIp,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ProviderKind::EmailValidityA => "email_validity_a",
            ProviderKind::EmailValidityB => "email_validity_b",
            ProviderKind::PhoneValidityA => "phone_validity_a",
            ProviderKind::PhoneValidityB => "phone_validity_b",
            ProviderKind::CallerId => "caller_id",
            ProviderKind::SocialProfile => "social_profile",
            ProviderKind::SelfIp => "self_ip",
            ProviderKind::Geolocation => "geolocation",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a provider call settled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProviderOutcome {
    Ok { payload: Value },
    Failed { reason: String },
}

/// Settled result of one provider call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderResult {
    pub provider: ProviderKind,
    #[serde(flatten)]
    pub outcome: ProviderOutcome,
    /// Wall time spent on the call (0 when no call was made)
    pub elapsed_ms: u64,
}

impl ProviderResult {
    pub fn ok(provider: ProviderKind, payload: Value) -> Self {
        Self {
            provider,
            outcome: ProviderOutcome::Ok { payload },
            elapsed_ms: 0,
        }
    }

    pub fn failed(provider: ProviderKind, reason: impl Into<String>) -> Self {
        Self {
            provider,
            outcome: ProviderOutcome::Failed {
                reason: reason.into(),
            },
            elapsed_ms: 0,
        }
    }

    /// Result for a provider that was skipped without a network call
    pub fn not_configured(provider: ProviderKind) -> Self {
        Self::failed(provider, NOT_CONFIGURED)
    }

    pub fn with_elapsed_ms(mut self, elapsed_ms: u64) -> Self {
        self.elapsed_ms = elapsed_ms;
        self
    }

    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, ProviderOutcome::Ok { .. })
    }

    pub fn payload(&self) -> Option<&Value> {
        match &self.outcome {
            ProviderOutcome::Ok { payload } => Some(payload),
            ProviderOutcome::Failed { .. } => None,
        }
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match &self.outcome {
            ProviderOutcome::Ok { .. } => None,
            ProviderOutcome::Failed { reason } => Some(reason),
        }
    }

    /// One-line description for the diagnostic trace
    pub fn summary(&self) -> String {
        match &self.outcome {
            ProviderOutcome::Ok { .. } => format!("{} ok in {}ms", self.provider, self.elapsed_ms),
            ProviderOutcome::Failed { reason } => {
                format!("{} failed in {}ms: {}", self.provider, self.elapsed_ms, reason)
            }
        }
    }
}
