// CasaOS HTTP client
//
// Wraps `reqwest::Client` with host normalization, per-request basic
// auth, and uniform status handling. Endpoint modules (app_grid) build
// on the `Transport` trait so they run over any implementation.

use std::future::Future;

use bytes::Bytes;
use reqwest::Method;
use reqwest::header::{ACCEPT, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Anything that can issue one request against the device and hand back
/// the raw success body.
///
/// Implementations own authentication and status handling: a non-2xx
/// answer must come back as [`Error::UnexpectedStatus`], never as bytes.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> impl Future<Output = Result<Bytes, Error>> + Send;
}

/// Authenticated client for one CasaOS device.
///
/// Immutable after construction, so a single instance can serve
/// concurrent `send` calls. Each request carries its own basic-auth
/// header; nothing is cached between calls.
pub struct CasaOsClient {
    http: reqwest::Client,
    base_url: Url,
    username: String,
    password: SecretString,
}

impl std::fmt::Debug for CasaOsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CasaOsClient")
            .field("base_url", &self.base_url.as_str())
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl CasaOsClient {
    /// Create a client for `host` using a freshly built `reqwest::Client`.
    ///
    /// `host` may omit the scheme (`http://` is assumed). Performs no
    /// network I/O; fails only on a malformed host or TLS setup error.
    pub fn new(
        host: &str,
        username: &str,
        password: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let base_url = normalize_host(host)?;
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            username: username.to_owned(),
            password: password.clone(),
        })
    }

    /// The normalized device base URL. Only a root path keeps its `/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `{base}{path}`; `path` is rooted at the device, e.g. `/v2/...`.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    /// Issue one authenticated request and return the success body.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<Bytes, Error> {
        let url = self.url(path)?;
        debug!(%method, %url, "sending request");

        let mut builder = self
            .http
            .request(method.clone(), url.clone())
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .header(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let resp = builder.send().await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(%method, %url, status = status.as_u16(), "device returned non-success status");
            return Err(Error::unexpected_status(status.as_u16(), &body));
        }

        Ok(resp.bytes().await?)
    }
}

impl Transport for CasaOsClient {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<Bytes, Error> {
        CasaOsClient::send(self, method, path, body).await
    }
}

/// Trim, scheme-qualify, and validate a host string.
///
/// `"casaos.local"` → `http://casaos.local/`, `" https://10.0.0.2:81/ "` →
/// `https://10.0.0.2:81/`, `"http://gw.lan/casaos/"` → `http://gw.lan/casaos`.
/// Hosts with embedded credentials are rejected so secrets never travel
/// through URLs or their error messages.
pub fn normalize_host(raw: &str) -> Result<Url, Error> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidHost {
            host: String::new(),
            reason: "host is empty".into(),
        });
    }

    let qualified = if trimmed.contains("://") {
        trimmed.to_owned()
    } else {
        format!("http://{trimmed}")
    };

    let mut url = Url::parse(&qualified).map_err(|e| Error::InvalidHost {
        host: trimmed.to_owned(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::InvalidHost {
            host: trimmed.to_owned(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(Error::InvalidHost {
            host: trimmed.to_owned(),
            reason: "missing host name".into(),
        });
    }

    if !url.username().is_empty() || url.password().is_some() {
        let _ = url.set_username("");
        let _ = url.set_password(None);
        return Err(Error::InvalidHost {
            host: url.to_string(),
            reason: "credentials must not be embedded in the host".into(),
        });
    }

    let path = url.path().trim_end_matches('/').to_owned();
    url.set_path(&path);
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}
