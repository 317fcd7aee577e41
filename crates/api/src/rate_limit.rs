//! Per-IP request throttling
//!
//! The prediction endpoint is cheap but unauthenticated, so the router is
//! wrapped in a tower_governor GCRA limiter keyed on peer IP. Quota state
//! is reported back to clients through X-RateLimit-* headers.

use governor::middleware::StateInformationMiddleware;
use std::sync::Arc;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;

/// Governor config keyed on peer IP, with header reporting enabled.
pub type PredictGovernorConfig =
    tower_governor::governor::GovernorConfig<PeerIpKeyExtractor, StateInformationMiddleware>;

/// Throttling knobs, part of [`crate::ApiConfig`].
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Seconds per replenished request
    pub per_second: u64,
    /// Requests a client may burst before throttling kicks in
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_second: 1,
            burst_size: 20,
        }
    }
}

/// Build the governor config consumed by `GovernorLayer`.
///
/// Peer-IP keying means the service must be started with
/// `into_make_service_with_connect_info::<SocketAddr>()`, which
/// [`crate::run_server`] does.
pub fn create_governor_config(config: &RateLimitConfig) -> Arc<PredictGovernorConfig> {
    Arc::new(
        GovernorConfigBuilder::default()
            .per_second(config.per_second)
            .burst_size(config.burst_size)
            .use_headers()
            .finish()
            .expect("rate limit parameters are non-zero"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RateLimitConfig::default();
        assert_eq!(config.per_second, 1);
        assert_eq!(config.burst_size, 20);
    }

    #[test]
    fn test_governor_config_builds() {
        let governor = create_governor_config(&RateLimitConfig::default());
        assert!(Arc::strong_count(&governor) > 0);
    }
}
