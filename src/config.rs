use std::time::Duration;

use thiserror::Error;

use crate::mock::MockModelServer;

pub const API_KEY_VAR: &str = "QUBRID_API_KEY";
pub const BASE_URL_VAR: &str = "QUBRID_BASE_URL";

pub const DEFAULT_HOST: &str = "platform.qubrid.com";
pub const DEFAULT_PATH_PREFIX: &str = "/api/v1/qubridai";

/// Per-call deadline. The upstream API gives no guidance; 30 seconds
/// covers the slowest hosted models without letting a caller hang.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

#[derive(Clone, Debug)]
pub struct EndpointUrl {
    pub scheme: Scheme,
    pub host: String,
    pub port: u16,
    pub path_prefix: String,
}

impl EndpointUrl {
    pub fn origin(&self) -> String {
        match (self.scheme, self.port) {
            (Scheme::Https, 443) => format!("https://{}", self.host),
            (Scheme::Http, 80) => format!("http://{}", self.host),
            _ => format!("{}://{}:{}", self.scheme.as_str(), self.host, self.port),
        }
    }
}

#[derive(Clone, Debug)]
pub enum Endpoint {
    Default,
    BaseUrl(EndpointUrl),
}

impl Endpoint {
    pub fn resolve(&self) -> EndpointUrl {
        match self {
            Endpoint::Default => EndpointUrl {
                scheme: Scheme::Https,
                host: DEFAULT_HOST.to_string(),
                port: 443,
                path_prefix: DEFAULT_PATH_PREFIX.to_string(),
            },
            Endpoint::BaseUrl(url) => url.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid base url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("base url missing host")]
    MissingHost,
    #[error("base url missing port")]
    MissingPort,
    #[error("unsupported url scheme: {0}")]
    UnsupportedScheme(String),
}

/// Explicit gateway configuration. Constructed once (usually from the
/// environment) and handed to the client, so tests can inject fake
/// credentials and endpoints instead of relying on ambient state.
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    pub api_key: Option<String>,
    pub endpoint: Endpoint,
    pub disable_proxy: bool,
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: Endpoint::Default,
            disable_proxy: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GatewayConfig {
    /// Read `QUBRID_API_KEY` and `QUBRID_BASE_URL` from the process
    /// environment. A missing key leaves `api_key` unset rather than
    /// failing; an unparseable base URL is logged and the default endpoint
    /// kept.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.api_key = std::env::var(API_KEY_VAR).ok().filter(|key| !key.is_empty());

        if let Ok(base_url) = std::env::var(BASE_URL_VAR) {
            match Self::from_base_url(&base_url) {
                Ok(parsed) => {
                    config.endpoint = parsed.endpoint;
                    config.disable_proxy = parsed.disable_proxy;
                }
                Err(err) => {
                    tracing::warn!(base_url = %base_url, error = %err, "ignoring unparseable QUBRID_BASE_URL");
                }
            }
        }

        config
    }

    pub fn from_base_url(base_url: impl AsRef<str>) -> Result<Self, ConfigError> {
        let url = url::Url::parse(base_url.as_ref())?;
        let scheme = match url.scheme() {
            "http" => Scheme::Http,
            "https" => Scheme::Https,
            other => return Err(ConfigError::UnsupportedScheme(other.to_string())),
        };

        let host = url
            .host_str()
            .ok_or(ConfigError::MissingHost)?
            .to_string();

        let port = url
            .port_or_known_default()
            .ok_or(ConfigError::MissingPort)?;

        let path_prefix = url.path().trim_end_matches('/').to_string();

        Ok(Self {
            api_key: None,
            endpoint: Endpoint::BaseUrl(EndpointUrl {
                scheme,
                host: host.clone(),
                port,
                path_prefix,
            }),
            disable_proxy: matches!(host.as_str(), "localhost" | "127.0.0.1"),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn for_mock_server(server: &MockModelServer) -> Result<Self, ConfigError> {
        let mut config = Self::from_base_url(server.base_url())?;
        config.disable_proxy = true;
        Ok(config)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The base URL queries are sent under, origin plus path prefix.
    pub fn base_url(&self) -> String {
        let endpoint = self.endpoint.resolve();
        format!("{}{}", endpoint.origin(), endpoint.path_prefix)
    }
}
