//! Identity Aggregator
//!
//! Runs the lookups for one identity in two stages:
//! - Stage 1: email, phone, caller-ID, social and self-IP lookups, all
//!   concurrent, joined only once every one has settled
//! - Stage 2: geolocation of the address discovered in stage 1
//!
//! Provider failures never abort a request. Once validation passes the caller
//! always gets a complete `AggregatedResponse`.

use chrono::Utc;
use futures::future::{join3, join_all};
use std::collections::HashMap;
use tracing::{info, warn};
use uuid::Uuid;

use gifte_core::{
    generate_dorks, normalize_social, score_profile, AggregatedResponse, IdentityRequest,
    IpBlock, ProviderKind, ProviderResult, SocialSection, Stage, TraceBuilder, ValidationError,
    UNKNOWN_IP,
};
use gifte_net::{NetError, ProviderClient, ProviderConfig};
use gifte_providers::{discovered_ip, merge_social, PlannedCall, ProviderCatalog};

/// Settled first-stage results, one slot per provider
struct StageOne {
    email_a: ProviderResult,
    email_b: ProviderResult,
    phone_a: ProviderResult,
    phone_b: ProviderResult,
    caller_id: ProviderResult,
    social: ProviderResult,
    self_ip: ProviderResult,
}

impl StageOne {
    /// Place results by provider, whatever order they settled in
    fn collect(results: Vec<ProviderResult>) -> Self {
        let mut slots: HashMap<ProviderKind, ProviderResult> =
            results.into_iter().map(|r| (r.provider, r)).collect();
        let mut take = |kind: ProviderKind| {
            slots
                .remove(&kind)
                .unwrap_or_else(|| ProviderResult::failed(kind, "not dispatched"))
        };

        Self {
            email_a: take(ProviderKind::EmailValidityA),
            email_b: take(ProviderKind::EmailValidityB),
            phone_a: take(ProviderKind::PhoneValidityA),
            phone_b: take(ProviderKind::PhoneValidityB),
            caller_id: take(ProviderKind::CallerId),
            social: take(ProviderKind::SocialProfile),
            self_ip: take(ProviderKind::SelfIp),
        }
    }
}

/// The identity-profile aggregation engine
#[derive(Clone)]
pub struct Aggregator {
    client: ProviderClient,
    catalog: ProviderCatalog,
}

impl Aggregator {
    pub fn new(client: ProviderClient, catalog: ProviderCatalog) -> Self {
        Self { client, catalog }
    }

    /// Aggregator over reqwest with the given configuration
    pub fn from_config(config: ProviderConfig) -> Result<Self, NetError> {
        let client = ProviderClient::from_config(&config)?;
        Ok(Self::new(client, ProviderCatalog::new(config)))
    }

    /// Aggregate an identity profile. Only validation can fail.
    pub async fn aggregate(
        &self,
        request: IdentityRequest,
    ) -> Result<AggregatedResponse, ValidationError> {
        let request_id = Uuid::new_v4();
        let mut trace = TraceBuilder::new();

        let identity = match request.validate() {
            Ok(identity) => identity,
            Err(e) => {
                warn!("Request {} rejected: {}", request_id, e);
                return Err(e);
            }
        };
        info!("Request {}: aggregating identity profile", request_id);
        trace.record(
            Stage::Validate,
            format!(
                "accepted (handle: {})",
                identity.handle().unwrap_or("none, using email local part")
            ),
        );

        // Stage 1: everything independent, joined after all settle
        let planned = self.catalog.stage_one(&identity);
        let dispatched = planned.iter().filter(|c| c.is_dispatched()).count();
        trace.record(
            Stage::FanOut,
            format!("dispatching {} of {} lookups", dispatched, planned.len()),
        );

        let results = join_all(planned.into_iter().map(|call| self.settle(call))).await;
        for result in &results {
            trace.record(Stage::FanOut, result.summary());
        }
        let stage_one = StageOne::collect(results);

        // Stage 2: geolocation needs the discovered address
        let ip = discovered_ip(&stage_one.self_ip);
        let address = ip.map_or_else(|| UNKNOWN_IP.to_string(), |ip| ip.to_string());
        trace.record(Stage::Geolocate, format!("public address {}", address));
        let geo = self.settle(self.catalog.geolocation(ip)).await;
        trace.record(Stage::Geolocate, geo.summary());

        let profile = normalize_social(&stage_one.social);
        trace.record(
            Stage::Normalize,
            if profile.is_usable() {
                format!(
                    "social profile usable (followers: {})",
                    profile
                        .follower_count
                        .map_or_else(|| "unknown".to_string(), |n| n.to_string())
                )
            } else {
                "no usable social profile".to_string()
            },
        );

        let dorks = generate_dorks(identity.email());
        trace.record(Stage::Dorks, format!("{} queries generated", dorks.len()));

        let scored = score_profile(&profile);
        trace.record(
            Stage::Score,
            format!(
                "gift '{}' score {} (matched: {})",
                scored.gift,
                scored.score,
                if scored.matched.is_empty() {
                    "none".to_string()
                } else {
                    scored.matched.join(", ")
                }
            ),
        );

        let lookups = [
            &stage_one.email_a,
            &stage_one.email_b,
            &stage_one.phone_a,
            &stage_one.phone_b,
            &stage_one.caller_id,
            &stage_one.social,
            &stage_one.self_ip,
            &geo,
        ];
        let failed = lookups.iter().filter(|r| !r.is_ok()).count();
        trace.record(
            Stage::Complete,
            format!("{} of {} lookups failed", failed, lookups.len()),
        );
        info!(
            "Request {} complete: score {}, {} lookups failed",
            request_id, scored.score, failed
        );

        Ok(AggregatedResponse {
            request_id,
            generated_at: Utc::now(),
            email: vec![stage_one.email_a, stage_one.email_b],
            phone: vec![stage_one.phone_a, stage_one.phone_b],
            caller_id: stage_one.caller_id,
            social: SocialSection {
                lookup: stage_one.social,
                profile,
            },
            ip: IpBlock {
                address,
                discovery: stage_one.self_ip,
                geo,
            },
            dorks,
            gift: scored.gift,
            score: scored.score,
            trace: trace.finish(),
        })
    }

    async fn settle(&self, call: PlannedCall) -> ProviderResult {
        match call {
            PlannedCall::Dispatch(spec) => self.client.call(&spec).await,
            PlannedCall::Social(lookup) => {
                let (profile, media, followers) = join3(
                    self.client.call(&lookup.profile),
                    self.client.call(&lookup.media),
                    self.client.call(&lookup.followers),
                )
                .await;
                merge_social(profile, media, followers)
            }
            PlannedCall::Resolved(result) => result,
        }
    }
}
