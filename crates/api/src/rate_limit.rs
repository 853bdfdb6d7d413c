//! Rate Limiting Middleware using GCRA Algorithm
//!
//! Per-IP rate limiting via tower_governor. Uses the Generic Cell Rate
//! Algorithm for accurate enforcement without background sweepers.

use governor::middleware::StateInformationMiddleware;
use std::sync::Arc;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;

use crate::settings::Settings;

/// Governor config with X-RateLimit-* response headers enabled.
pub type DefaultGovernorConfig =
    tower_governor::governor::GovernorConfig<PeerIpKeyExtractor, StateInformationMiddleware>;

/// Build the governor config from server settings.
///
/// Requires the service to be built with
/// `into_make_service_with_connect_info::<SocketAddr>()` so the peer IP is
/// available for key extraction.
pub fn create_governor_config(settings: &Settings) -> Arc<DefaultGovernorConfig> {
    Arc::new(
        GovernorConfigBuilder::default()
            .per_second(settings.rate_limit_per_second)
            .burst_size(settings.rate_limit_burst)
            .use_headers()
            .finish()
            .expect("rate limit settings must be non-zero"),
    )
}
