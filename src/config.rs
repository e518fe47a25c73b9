use axum::http::HeaderValue;
use thiserror::Error;

const DEV_BACKEND_URL: &str = "http://localhost:8000";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("BACKEND_URL must be set when APP_ENV=production")]
    MissingBackendUrl,

    #[error("BACKEND_URL '{0}' must start with http:// or https://")]
    InvalidBackendUrl(String),

    #[error("CORS_ALLOWED_ORIGIN '{0}' is not a valid header value")]
    InvalidOrigin(String),

    #[error("{name} has an invalid value '{value}'")]
    InvalidNumber { name: &'static str, value: String },
}

/// Relay settings, resolved once at startup.
///
/// `BACKEND_URL` is the only source for the backend address. Development
/// falls back to a local backend; production refuses to start without it.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub backend_url: String,
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
    pub cors_allowed_origin: Option<HeaderValue>,
    pub static_dir: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset.
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let environment = match get("APP_ENV").as_deref() {
            Some(env) if env.eq_ignore_ascii_case("production") => Environment::Production,
            _ => Environment::Development,
        };

        let backend_url = match (get("BACKEND_URL"), environment) {
            (Some(url), _) => url,
            (None, Environment::Development) => DEV_BACKEND_URL.to_string(),
            (None, Environment::Production) => return Err(ConfigError::MissingBackendUrl),
        };
        if !(backend_url.starts_with("http://") || backend_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBackendUrl(backend_url));
        }
        let backend_url = backend_url.trim_end_matches('/').to_string();

        let port = match get("PORT") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidNumber { name: "PORT", value })?,
            None => DEFAULT_PORT,
        };

        let max_upload_bytes = match get("MAX_UPLOAD_BYTES") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidNumber { name: "MAX_UPLOAD_BYTES", value })?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        let cors_allowed_origin = match get("CORS_ALLOWED_ORIGIN") {
            Some(origin) => Some(
                HeaderValue::from_str(&origin).map_err(|_| ConfigError::InvalidOrigin(origin))?,
            ),
            None => None,
        };

        Ok(Self {
            environment,
            backend_url,
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            max_upload_bytes,
            cors_allowed_origin,
            static_dir: get("STATIC_DIR"),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
