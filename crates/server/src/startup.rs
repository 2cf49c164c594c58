use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use common::captcha::CaptchaVerifier;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use service::rate_limit::RateLimiter;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Public entry: load configuration, connect the store and serve.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_default();

    let cfg = configs::AppConfig::load_or_default();

    let db = models::db::connect_with(&cfg.database).await?;

    let captcha = CaptchaVerifier::new(
        cfg.security.recaptcha_secret.clone(),
        Duration::from_secs(cfg.security.recaptcha_timeout_secs),
    )?;
    if !captcha.has_secret() {
        warn!("recaptcha secret not configured; captcha verification is a no-op");
    }

    let contact_limiter = RateLimiter::new(
        cfg.security.contact_rate_limit,
        Duration::from_secs(cfg.security.contact_rate_window_secs),
        cfg.security.rate_limit_enabled,
    );

    let state = AppState {
        db,
        captcha,
        contact_limiter,
        admin_api_key: cfg.security.admin_api_key.clone(),
        media: cfg.media.clone(),
    };

    let app: Router = routes::build_router(state, build_cors());

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, "starting content API server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;
    Ok(())
}
