//! HTTP client setup and middleware configuration.
//!
//! Bootstrap transfers are single attempts: the client carries the tracing
//! middleware but no retry policy.
//!
//! # Examples
//!
//! ```rust
//! use zomboid_workshop::http::{create_http_client, HttpClientConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = create_http_client(HttpClientConfig::default())?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Client with Proxy
//!
//! ```rust,no_run
//! use zomboid_workshop::http::{create_http_client, HttpClientConfig};
//! use reqwest::Proxy;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HttpClientConfig {
//!     proxy: Some(Proxy::all("http://proxy.example.com:8080")?),
//!     headers: None,
//! };
//! let client = create_http_client(config)?;
//! # Ok(())
//! # }
//! ```

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Proxy;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;

use crate::error::{Error, Result};

/// Configuration for HTTP client setup.
#[derive(Debug, Clone, Default)]
pub struct HttpClientConfig {
    /// Optional proxy configuration.
    pub proxy: Option<Proxy>,
    /// Default headers to include with all requests.
    pub headers: Option<HeaderMap>,
}

/// User agent sent when the configuration does not set one.
pub const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Parse a proxy URL such as `socks5://127.0.0.1:1080` for every scheme.
pub fn parse_proxy(raw: &str) -> Result<Proxy> {
    Proxy::all(raw).map_err(|source| Error::InvalidProxy {
        proxy: raw.to_string(),
        source,
    })
}

/// Creates an HTTP client with middleware configuration.
///
/// The client traces every request and applies the optional proxy and
/// default headers.
pub fn create_http_client(
    config: HttpClientConfig,
) -> std::result::Result<ClientWithMiddleware, reqwest::Error> {
    let mut headers = config.headers.unwrap_or_default();
    if !headers.contains_key(USER_AGENT) {
        headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
    }

    let mut inner_client_builder = reqwest::Client::builder().default_headers(headers);
    if let Some(proxy) = config.proxy {
        inner_client_builder = inner_client_builder.proxy(proxy);
    }
    let inner_client = inner_client_builder.build()?;

    let client = ClientBuilder::new(inner_client)
        // Trace HTTP requests. See the tracing crate to make use of these traces.
        .with(TracingMiddleware::default())
        .build();

    Ok(client)
}
