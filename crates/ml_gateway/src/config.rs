//! Gateway configuration
//!
//! Everything is read once from the process environment at startup and then
//! shared read-only for the lifetime of the process.

use std::fmt;
use std::time::Duration;

use url::Url;

use crate::error::{GatewayError, Result};

pub const DEFAULT_PORT: u16 = 3333;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_AUTH_URL: &str = "https://auth.mercadolivre.com.br/authorization";
pub const DEFAULT_API_BASE_URL: &str = "https://api.mercadolibre.com";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// OAuth application credentials registered with the marketplace
#[derive(Clone, Default)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

/// Upstream marketplace URLs
#[derive(Debug, Clone)]
pub struct MarketplaceEndpoints {
    /// Browser-facing authorization page
    pub auth_url: Url,
    /// Server-to-server token endpoint
    pub token_url: Url,
    /// Base URL of the REST API (`/users/me`, `/orders/...`)
    pub api_base_url: Url,
}

impl MarketplaceEndpoints {
    /// Endpoints derived from a single API base, with the token endpoint at `/oauth/token`
    pub fn with_api_base(auth_url: &str, api_base_url: &str) -> Result<Self> {
        let api_base_url = parse_url("ML_API_BASE_URL", api_base_url)?;
        let token_url = with_segments(&api_base_url, &["oauth", "token"])?;

        Ok(Self {
            auth_url: parse_url("ML_AUTH_URL", auth_url)?,
            token_url,
            api_base_url,
        })
    }
}

/// Process-wide gateway configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    pub credentials: Credentials,
    pub endpoints: MarketplaceEndpoints,
    /// Applied to every outbound marketplace call
    pub http_timeout: Duration,
}

impl GatewayConfig {
    /// Load configuration from the process environment
    ///
    /// Recognized variables:
    /// - `ML_CLIENT_ID`, `ML_CLIENT_SECRET`, `ML_REDIRECT_URI`: app credentials (not validated)
    /// - `PORT` (default 3333), `HOST` (default 0.0.0.0)
    /// - `ML_AUTH_URL`, `ML_API_BASE_URL`, `ML_TOKEN_URL`: upstream overrides
    /// - `ML_HTTP_TIMEOUT_SECS` (default 30)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let credentials = Credentials {
            client_id: var("ML_CLIENT_ID").unwrap_or_default(),
            client_secret: var("ML_CLIENT_SECRET").unwrap_or_default(),
            redirect_uri: var("ML_REDIRECT_URI").unwrap_or_default(),
        };

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| GatewayError::Config(format!("PORT '{}': {}", raw, e)))?,
            None => DEFAULT_PORT,
        };

        let http_timeout_secs = match var("ML_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                GatewayError::Config(format!("ML_HTTP_TIMEOUT_SECS '{}': {}", raw, e))
            })?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        let mut endpoints = MarketplaceEndpoints::with_api_base(
            var("ML_AUTH_URL").as_deref().unwrap_or(DEFAULT_AUTH_URL),
            var("ML_API_BASE_URL").as_deref().unwrap_or(DEFAULT_API_BASE_URL),
        )?;
        if let Some(token_url) = var("ML_TOKEN_URL") {
            endpoints.token_url = parse_url("ML_TOKEN_URL", &token_url)?;
        }

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            credentials,
            endpoints,
            http_timeout: Duration::from_secs(http_timeout_secs),
        })
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Append percent-encoded path segments, keeping any path already on `base`
pub fn with_segments(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| GatewayError::Config(format!("'{}' cannot be a base URL", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn parse_url(name: &str, raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| GatewayError::Config(format!("{} '{}': {}", name, raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(GatewayError::Config(format!("{} '{}': not a base URL", name, raw)));
    }
    Ok(url)
}
