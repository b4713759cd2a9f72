//! Provider catalogue
//!
//! Turns a validated identity and the injected configuration into the set of
//! calls the orchestrator runs. A provider that must not be called resolves
//! here, without touching the network.

use gifte_core::{ProviderKind, ProviderResult, ValidatedIdentity, IP_DETECTION_FAILED};
use gifte_net::{ProviderConfig, ProviderSpec};
use std::net::IpAddr;
use tracing::debug;

use crate::{
    caller_id, email_validity_a, email_validity_b, geolocation, phone_validity_a,
    phone_validity_b, self_ip, social_lookup, SocialLookup,
};

/// A provider lookup that is either dispatched or already settled
#[derive(Debug, Clone, PartialEq)]
pub enum PlannedCall {
    Dispatch(ProviderSpec),
    /// Profile, media and follower calls, merged with `merge_social`
    Social(SocialLookup),
    Resolved(ProviderResult),
}

impl PlannedCall {
    pub fn kind(&self) -> ProviderKind {
        match self {
            PlannedCall::Dispatch(spec) => spec.kind,
            PlannedCall::Social(_) => ProviderKind::SocialProfile,
            PlannedCall::Resolved(result) => result.provider,
        }
    }

    /// Whether settling this call touches the network
    pub fn is_dispatched(&self) -> bool {
        !matches!(self, PlannedCall::Resolved(_))
    }
}

/// Builds provider calls from configuration
#[derive(Debug, Clone)]
pub struct ProviderCatalog {
    config: ProviderConfig,
}

impl ProviderCatalog {
    pub fn new(config: ProviderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Every first-stage call, in `ProviderKind::STAGE_ONE` order
    pub fn stage_one(&self, identity: &ValidatedIdentity) -> Vec<PlannedCall> {
        let config = &self.config;
        vec![
            PlannedCall::Dispatch(email_validity_a(&config.email_a, identity)),
            PlannedCall::Dispatch(email_validity_b(&config.email_b, identity)),
            PlannedCall::Dispatch(phone_validity_a(&config.phone_a, identity)),
            PlannedCall::Dispatch(phone_validity_b(&config.phone_b, identity)),
            self.caller_id_call(identity),
            PlannedCall::Social(social_lookup(&config.social, identity)),
            PlannedCall::Dispatch(self_ip(&config.self_ip)),
        ]
    }

    fn caller_id_call(&self, identity: &ValidatedIdentity) -> PlannedCall {
        let spec = if self.config.caller_id_enabled {
            caller_id(&self.config.caller_id, identity)
        } else {
            None
        };

        match spec {
            Some(spec) => PlannedCall::Dispatch(spec),
            None => {
                debug!("Caller-ID lookup skipped: disabled or missing credentials");
                PlannedCall::Resolved(ProviderResult::not_configured(ProviderKind::CallerId))
            }
        }
    }

    /// Second-stage geolocation for the address discovered in stage one
    pub fn geolocation(&self, ip: Option<IpAddr>) -> PlannedCall {
        match ip {
            Some(ip) => PlannedCall::Dispatch(geolocation(&self.config.geo, ip)),
            None => PlannedCall::Resolved(ProviderResult::failed(
                ProviderKind::Geolocation,
                IP_DETECTION_FAILED,
            )),
        }
    }
}
