//! Ambient HTTP/WS edge concerns: CORS and IP rate limiting. These
//! apply regardless of how thin the admin surface above them is -
//! rate limiting and CORS guard the edge, not the excluded CRUD
//! surface itself.

use axum::{
    extract::{ConnectInfo, Request},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use governor::{clock::DefaultClock, state::keyed::DefaultKeyedStateStore, Quota, RateLimiter};
use std::sync::OnceLock;
use std::{net::SocketAddr, num::NonZeroU32, sync::Arc, time::Duration};
use tower_http::cors::CorsLayer;

pub type IpRateLimiter = Arc<RateLimiter<String, DefaultKeyedStateStore<String>, DefaultClock>>;

/// 1000 schedule/cancel/state requests per minute per IP - generous
/// since the real caller is the admin service, not an end user.
static API_LIMITER: OnceLock<IpRateLimiter> = OnceLock::new();

fn api_quota() -> Quota {
    Quota::per_minute(NonZeroU32::new(1000).unwrap())
}

pub async fn rate_limit_middleware(request: Request, next: Next) -> Result<Response, StatusCode> {
    let limiter = API_LIMITER.get_or_init(|| Arc::new(RateLimiter::keyed(api_quota())));

    let client_ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    match limiter.check_key(&client_ip) {
        Ok(_) => Ok(next.run(request).await),
        Err(_) => {
            tracing::warn!("rate limit exceeded for IP: {}", client_ip);
            Err(StatusCode::TOO_MANY_REQUESTS)
        }
    }
}

pub fn cors_layer() -> CorsLayer {
    let allowed_origins = std::env::var("ALLOWED_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000".to_string())
        .split(',')
        .map(|s| s.trim().parse().unwrap())
        .collect::<Vec<_>>();

    tracing::info!("CORS allowed origins: {:?}", allowed_origins);

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([axum::http::header::CONTENT_TYPE, axum::http::header::ACCEPT])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}
