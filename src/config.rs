use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            "staging" => Self::Staging,
            _ => Self::Dev,
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    /// Explicit `LOG_FORMAT` wins; otherwise JSON in production only.
    pub fn resolve(value: Option<&str>, env: &Environment) -> Self {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("json") => Self::Json,
            Some("pretty") => Self::Pretty,
            _ if matches!(env, Environment::Prod) => Self::Json,
            _ => Self::Pretty,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub env: Environment,
    pub server_addr: String,
    pub log_format: LogFormat,

    // CORS
    pub cors_allow_origins: Vec<String>,

    // Limits
    pub max_body_bytes: usize,

    // Notification stream
    pub sse_keepalive_seconds: u64,
    pub session_channel_capacity: usize,
    pub session_ttl_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            env: Environment::Dev,
            server_addr: "0.0.0.0:8787".to_string(),
            log_format: LogFormat::Pretty,
            cors_allow_origins: vec!["*".to_string()],
            max_body_bytes: 1024 * 1024,
            sse_keepalive_seconds: 15,
            session_channel_capacity: 32,
            session_ttl_seconds: 3600,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let env = Environment::from_str(&env::var("ENV").unwrap_or_else(|_| "dev".to_string()));
        let server_addr = env::var("SERVER_ADDR").unwrap_or(defaults.server_addr);
        server_addr
            .parse::<SocketAddr>()
            .with_context(|| {
                format!("SERVER_ADDR is not a valid socket address: {}", server_addr)
            })?;

        let log_format = LogFormat::resolve(env::var("LOG_FORMAT").ok().as_deref(), &env);

        // CORS
        let cors_allow_origins = env::var("CORS_ALLOW_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.cors_allow_origins);

        // Limits
        let max_body_bytes = parse_or("MAX_BODY_BYTES", defaults.max_body_bytes);

        // Notification stream
        let sse_keepalive_seconds =
            parse_or("SSE_KEEPALIVE_SECONDS", defaults.sse_keepalive_seconds);
        let session_channel_capacity =
            parse_or("SESSION_CHANNEL_CAPACITY", defaults.session_channel_capacity);
        let session_ttl_seconds = parse_or("SESSION_TTL_SECONDS", defaults.session_ttl_seconds);

        Ok(Settings {
            env,
            server_addr,
            log_format,
            cors_allow_origins,
            max_body_bytes,
            sse_keepalive_seconds,
            session_channel_capacity,
            session_ttl_seconds,
        })
    }

    /// `*` anywhere in the origin list opens CORS to every origin.
    pub fn cors_allows_any_origin(&self) -> bool {
        self.cors_allow_origins.iter().any(|o| o == "*")
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
