use std::str::FromStr;

use desk_client::ClientConfig;
use rust_decimal::Decimal;

/// Default tax percent seeded into fresh billings
pub const DEFAULT_TAX_PERCENT: Decimal = Decimal::from_parts(13, 0, 0, false, 0);

/// Core configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | DESK_API_URL | http://localhost:8080/api | REST backend base URL |
/// | DESK_API_TOKEN | unset | bearer token forwarded as-is |
/// | REQUEST_TIMEOUT_MS | 30000 | HTTP request timeout |
/// | ENVIRONMENT | development | development / staging / production |
/// | LOG_LEVEL | info | tracing filter |
/// | LOG_JSON | false | JSON console output |
/// | LOG_DIR | unset | enables rolling file logs |
/// | LOG_RETENTION_DAYS | 14 | app log retention |
/// | DEFAULT_TAX_PERCENT | 13 | tax seeded into fresh billings |
///
/// ```ignore
/// DESK_API_URL=https://desk.example.com/api LOG_JSON=true cargo run
/// ```
#[derive(Debug, Clone)]
pub struct DeskConfig {
    pub api_url: String,
    pub api_token: Option<String>,
    pub request_timeout_ms: u64,
    /// development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    pub log_retention_days: i64,
    pub default_tax_percent: Decimal,
}

impl DeskConfig {
    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let default_tax_percent = non_empty("DEFAULT_TAX_PERCENT")
            .and_then(|v| Decimal::from_str(v.trim()).ok())
            .filter(|p| *p >= Decimal::ZERO && *p <= Decimal::ONE_HUNDRED)
            .unwrap_or(DEFAULT_TAX_PERCENT);

        Self {
            api_url: non_empty("DESK_API_URL")
                .unwrap_or_else(|| "http://localhost:8080/api".into()),
            api_token: non_empty("DESK_API_TOKEN"),
            request_timeout_ms: non_empty("REQUEST_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(30000),
            environment: non_empty("ENVIRONMENT").unwrap_or_else(|| "development".into()),
            log_level: non_empty("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: non_empty("LOG_JSON")
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: non_empty("LOG_DIR"),
            log_retention_days: non_empty("LOG_RETENTION_DAYS")
                .and_then(|v| v.parse().ok())
                .filter(|d| *d > 0)
                .unwrap_or(14),
            default_tax_percent,
        }
    }

    /// HTTP client configuration for the REST backend
    pub fn client_config(&self) -> ClientConfig {
        let config =
            ClientConfig::new(self.api_url.clone()).with_timeout_ms(self.request_timeout_ms);
        match &self.api_token {
            Some(token) => config.with_token(token.clone()),
            None => config,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
