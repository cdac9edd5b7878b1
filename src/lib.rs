pub mod config;
pub mod error;
pub mod state;
pub mod auth;
pub mod cache;
pub mod store;
pub mod models;
pub mod routes;
pub mod email;
pub mod rate_limit;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::{HeaderName, HeaderValue};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::cache::ResetTokenCache;
use crate::config::Config;
use crate::email::SystemMailer;
use crate::rate_limit::IpRateLimiter;
use crate::state::{AppState, SharedState};
use crate::store::UserStore;

pub fn build_app(store: Arc<dyn UserStore>, config: Config) -> (Router, SharedState) {
    // Build system mailer
    let mailer = config.smtp.as_ref().and_then(|smtp| {
        match SystemMailer::new(smtp) {
            Ok(mailer) => {
                tracing::info!("System SMTP configured");
                Some(Arc::new(mailer))
            }
            Err(e) => {
                tracing::warn!("System SMTP not available: {e}");
                None
            }
        }
    });

    let reset_tokens = ResetTokenCache::new(Duration::from_secs(config.reset_token_ttl));

    let state: SharedState = Arc::new(AppState {
        store,
        config,
        mailer,
        reset_tokens,
        login_limiter: IpRateLimiter::new(5, Duration::from_secs(60)),
        forgot_limiter: IpRateLimiter::new(3, Duration::from_secs(60)),
    });

    let app = Router::new()
        .merge(routes::api_routes())
        .route("/health", axum::routing::get(health))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(state.clone());

    (app, state)
}

async fn health() -> &'static str {
    "ok"
}
