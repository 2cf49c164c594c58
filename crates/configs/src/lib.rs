use anyhow::{anyhow, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub security: SecurityConfig,
    #[serde(default)]
    pub media: MediaConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

/// Anti-spam and admin-access knobs for the contact endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// Shared key expected in `X-API-Key` for admin routes. Unset means
    /// every admin request is rejected.
    #[serde(default)]
    pub admin_api_key: Option<String>,
    /// reCAPTCHA server secret. Unset means verification is a no-op
    /// success; only acceptable outside production.
    #[serde(default)]
    pub recaptcha_secret: Option<String>,
    #[serde(default = "default_recaptcha_timeout")]
    pub recaptcha_timeout_secs: u64,
    /// Contact submissions allowed per client per window.
    #[serde(default = "default_contact_rate_limit")]
    pub contact_rate_limit: u32,
    #[serde(default = "default_contact_rate_window")]
    pub contact_rate_window_secs: u64,
    #[serde(default = "default_rate_limit_enabled")]
    pub rate_limit_enabled: bool,
}

fn default_recaptcha_timeout() -> u64 { 5 }
fn default_contact_rate_limit() -> u32 { 10 }
fn default_contact_rate_window() -> u64 { 3600 }
fn default_rate_limit_enabled() -> bool { true }

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            admin_api_key: None,
            recaptcha_secret: None,
            recaptcha_timeout_secs: default_recaptcha_timeout(),
            contact_rate_limit: default_contact_rate_limit(),
            contact_rate_window_secs: default_contact_rate_window(),
            rate_limit_enabled: default_rate_limit_enabled(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaConfig {
    /// URL prefix under which uploaded files are exposed.
    #[serde(default = "default_media_url_prefix")]
    pub url_prefix: String,
    /// Directory served at `url_prefix`.
    #[serde(default = "default_media_root")]
    pub root: String,
}

fn default_media_url_prefix() -> String { "/media/".into() }
fn default_media_root() -> String { "media".into() }

impl Default for MediaConfig {
    fn default() -> Self {
        Self { url_prefix: default_media_url_prefix(), root: default_media_root() }
    }
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Best effort: config file if present, defaults otherwise. Env vars
    /// are folded in either way.
    pub fn load_or_default() -> Self {
        let mut cfg = load_default().unwrap_or_default();
        cfg.database.normalize_from_env();
        cfg.security.normalize_from_env();
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        self.security.normalize_from_env();
        self.media.normalize();
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        // TOML wins; the env var only fills a missing URL.
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
            return Err(anyhow!("database.url must start with postgresql:// or postgres://"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl SecurityConfig {
    pub fn normalize_from_env(&mut self) {
        if self.admin_api_key.is_none() {
            if let Ok(key) = std::env::var("ADMIN_API_KEY") {
                if !key.trim().is_empty() {
                    self.admin_api_key = Some(key);
                }
            }
        }
        if self.recaptcha_secret.is_none() {
            if let Ok(secret) = std::env::var("RECAPTCHA_SECRET") {
                if !secret.trim().is_empty() {
                    self.recaptcha_secret = Some(secret);
                }
            }
        }
        if self.contact_rate_limit == 0 {
            self.contact_rate_limit = default_contact_rate_limit();
        }
        if self.contact_rate_window_secs == 0 {
            self.contact_rate_window_secs = default_contact_rate_window();
        }
    }
}

impl MediaConfig {
    fn normalize(&mut self) {
        if self.url_prefix.trim().is_empty() {
            self.url_prefix = default_media_url_prefix();
        }
        if !self.url_prefix.starts_with('/') {
            self.url_prefix.insert(0, '/');
        }
        if !self.url_prefix.ends_with('/') {
            self.url_prefix.push('/');
        }
        if self.root.trim().is_empty() {
            self.root = default_media_root();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.security.contact_rate_limit, 10);
        assert_eq!(cfg.security.contact_rate_window_secs, 3600);
        assert_eq!(cfg.security.recaptcha_timeout_secs, 5);
        assert!(cfg.security.rate_limit_enabled);
        assert_eq!(cfg.media.url_prefix, "/media/");
    }

    #[test]
    fn parses_partial_toml() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000

            [security]
            contact_rate_limit = 3
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.security.contact_rate_limit, 3);
        // untouched sections fall back to defaults
        assert_eq!(cfg.database.max_connections, 10);
    }

    #[test]
    fn media_prefix_is_normalized() {
        let mut media = MediaConfig { url_prefix: "uploads".into(), root: "media".into() };
        media.normalize();
        assert_eq!(media.url_prefix, "/uploads/");
    }

    #[test]
    fn database_validation_rejects_non_postgres() {
        let db = DatabaseConfig { url: "mysql://x".into(), ..DatabaseConfig::default() };
        assert!(db.validate().is_err());
    }
}
