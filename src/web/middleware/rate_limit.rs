//! Per-IP rate limiting for form submissions, using a token bucket.
//!
//! Keys come from the socket peer address, so the router must be served
//! with `into_make_service_with_connect_info::<SocketAddr>()`.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

pub type RateLimitLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Limiter for ordinary form actions: 2 requests per second, burst of 30.
///
/// Requests over the limit receive `429 Too Many Requests`.
pub fn layer() -> RateLimitLayer {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_millisecond(500)
            .burst_size(30)
            .finish()
            .expect("non-zero rate limit settings"),
    );

    GovernorLayer::new(governor_conf)
}

/// Stricter limiter for login and registration: one request every
/// 2 seconds, burst of 5.
pub fn secure_layer() -> RateLimitLayer {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(2)
            .burst_size(5)
            .finish()
            .expect("non-zero rate limit settings"),
    );

    GovernorLayer::new(governor_conf)
}
