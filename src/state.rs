use std::sync::Arc;

use crate::cache::ResetTokenCache;
use crate::config::Config;
use crate::email::SystemMailer;
use crate::rate_limit::IpRateLimiter;
use crate::store::UserStore;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub config: Config,
    pub mailer: Option<Arc<SystemMailer>>,
    pub reset_tokens: ResetTokenCache,
    pub login_limiter: IpRateLimiter,
    pub forgot_limiter: IpRateLimiter,
}
