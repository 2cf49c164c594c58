use common::captcha::CaptchaVerifier;
use configs::MediaConfig;
use sea_orm::DatabaseConnection;
use service::rate_limit::RateLimiter;

/// Shared per-process request context. Cheap to clone; the rate limiter is
/// the only mutable piece and synchronizes internally.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub captcha: CaptchaVerifier,
    pub contact_limiter: RateLimiter,
    pub admin_api_key: Option<String>,
    pub media: MediaConfig,
}
