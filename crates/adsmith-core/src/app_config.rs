use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub anthropic_api_key: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub generation_model: String,
    pub generation_max_tokens: u32,
    pub generation_temperature: f32,
    pub generation_timeout_secs: u64,
    pub scraper_timeout_secs: u64,
    pub scraper_user_agent: String,
    pub scraper_max_concurrent_renders: usize,
    pub render_api_url: Option<String>,
    pub render_api_key: Option<String>,
    pub cache_ttl_secs: u64,
    pub rate_limit_max_requests: usize,
    pub rate_limit_window_secs: u64,
    pub cors_allowed_origins: Vec<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("database_url", &"[redacted]")
            .field("anthropic_api_key", &"[redacted]")
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("generation_model", &self.generation_model)
            .field("generation_max_tokens", &self.generation_max_tokens)
            .field("generation_temperature", &self.generation_temperature)
            .field("generation_timeout_secs", &self.generation_timeout_secs)
            .field("scraper_timeout_secs", &self.scraper_timeout_secs)
            .field("scraper_user_agent", &self.scraper_user_agent)
            .field(
                "scraper_max_concurrent_renders",
                &self.scraper_max_concurrent_renders,
            )
            .field("render_api_url", &self.render_api_url)
            .field(
                "render_api_key",
                &self.render_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("cache_ttl_secs", &self.cache_ttl_secs)
            .field("rate_limit_max_requests", &self.rate_limit_max_requests)
            .field("rate_limit_window_secs", &self.rate_limit_window_secs)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .finish()
    }
}
