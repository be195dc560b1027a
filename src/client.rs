//! vRealize Operations API client.
//!
//! Low-level HTTP client that handles token acquisition and raw requests.
//! Higher-level operations are implemented via traits on record types.

use std::env;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CACHE_CONTROL};
use reqwest::{Client, Method, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::decode::{datetime_from_epoch_ms, DecodeMode};
use crate::error::{Result, VropsError};
use crate::models::{ResourcesResponse, VirtualMachine};
use crate::session::Session;
use crate::traits::List;

/// Limit of data in bytes the client will read from a server.
pub const RECEIVER_DATA_LIMIT: u64 = 1_000_000;

const PATH_PREFIX: &str = "suite-api/api/";
const AUTH_SCHEME: &str = "vRealizeOpsToken";
const ACCEPT_JSON: &str = "application/json;charset=utf-8";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("vropsapi/", env!("CARGO_PKG_VERSION"));

/// URL scheme the platform is reached over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheme {
    Http,
    #[default]
    Https,
}

impl Scheme {
    /// The scheme name as it appears in a URL.
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }

    /// The port implied when none is given.
    pub fn default_port(self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = VropsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "http" => Ok(Scheme::Http),
            "https" => Ok(Scheme::Https),
            _ => Err(VropsError::Config(format!(
                "supported protocols: http, https; unsupported protocol: {s}"
            ))),
        }
    }
}

/// Low-level vRealize Operations API client.
///
/// Handles token acquisition and HTTP requests against the platform's
/// `suite-api`. Record-specific listing is implemented via the [`List`]
/// trait on model types. Authentication state lives in a caller-owned
/// [`Session`], not in the client.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use vropsapi::{Session, VropsClient};
///
/// # async fn example() -> vropsapi::Result<()> {
/// // Create from environment variables
/// let client = VropsClient::from_env()?;
///
/// // Or configure manually
/// let client = VropsClient::builder()
///     .host("vrops.example.com")
///     .username("svc-inventory")
///     .password("secret")
///     .build()?;
///
/// let mut session = Session::new();
/// let machines = client.virtual_machines(&mut session).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct VropsClient {
    http: Client,
    base_url: Arc<Url>,
    username: String,
    password: String,
    decode_mode: DecodeMode,
    data_limit: u64,
}

impl std::fmt::Debug for VropsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VropsClient")
            .field("base_url", &self.base_url.as_str())
            .field("username", &self.username)
            .field("decode_mode", &self.decode_mode)
            .field("data_limit", &self.data_limit)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct AuthRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Response from the token acquisition endpoint, decoded leniently: the
/// platform is free to add fields here.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct AuthResponse {
    token: String,
    /// Expiry as milliseconds since epoch.
    validity: f64,
    /// Human-readable expiry label, informational only.
    expires_at: String,
    roles: Vec<Value>,
}

impl VropsClient {
    /// Start building a client.
    pub fn builder() -> VropsClientBuilder {
        VropsClientBuilder::new()
    }

    /// Create a client from environment variables.
    ///
    /// Reads `VROPS_HOST`, `VROPS_USERNAME` and `VROPS_PASSWORD`, plus the
    /// optional `VROPS_PORT`, `VROPS_SCHEME` and `VROPS_VALIDATE_CERTS`
    /// (a truthy value such as `1`, `true` or `yes` enables it).
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is not set or a value does
    /// not validate.
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::builder();

        builder = builder.host(env::var("VROPS_HOST").map_err(|_| {
            VropsError::Config("VROPS_HOST environment variable not set".to_string())
        })?);
        if let Ok(port) = env::var("VROPS_PORT") {
            let port = port
                .parse::<u16>()
                .map_err(|_| VropsError::Config(format!("invalid port: {port}")))?;
            builder = builder.port(port);
        }
        if let Ok(scheme) = env::var("VROPS_SCHEME") {
            builder = builder.scheme(scheme.parse()?);
        }
        builder = builder.username(env::var("VROPS_USERNAME").map_err(|_| {
            VropsError::Config("VROPS_USERNAME environment variable not set".to_string())
        })?);
        builder = builder.password(env::var("VROPS_PASSWORD").map_err(|_| {
            VropsError::Config("VROPS_PASSWORD environment variable not set".to_string())
        })?);
        if let Ok(validate) = env::var("VROPS_VALIDATE_CERTS") {
            builder = builder.validate_certs(matches!(
                validate.as_str(),
                "y" | "yes" | "t" | "true" | "on" | "1"
            ));
        }

        builder.build()
    }

    /// The rebased base URL requests are made against, prefix included.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// How response bodies are decoded.
    pub fn decode_mode(&self) -> DecodeMode {
        self.decode_mode
    }

    /// Acquire a token for the session if it does not hold one yet.
    ///
    /// Idempotent: a session with a token is returned untouched, without
    /// checking its expiry. Otherwise POSTs the credentials to
    /// `auth/token/acquire` and stores the returned token and its computed
    /// expiry into the session.
    ///
    /// # Errors
    ///
    /// Returns [`VropsError::AuthenticationFailed`] on a non-200 status or
    /// an empty token, [`VropsError::Transport`] on network failure.
    #[tracing::instrument(skip(self, session))]
    pub async fn ensure_authenticated(&self, session: &mut Session) -> Result<()> {
        if session.is_authenticated() {
            return Ok(());
        }

        let url = self.base_url.join("auth/token/acquire")?;
        tracing::debug!(url = %url, "acquiring token");

        let response = self
            .http
            .post(url)
            .json(&AuthRequest {
                username: &self.username,
                password: &self.password,
            })
            .send()
            .await?;
        let status = response.status();
        tracing::debug!(status = %status, "auth response");

        let body = self.read_body(response).await?;
        if status.as_u16() != 200 {
            return Err(VropsError::AuthenticationFailed(format!(
                "status code {}",
                status.as_u16()
            )));
        }

        let auth: AuthResponse = serde_json::from_slice(&body)?;
        if auth.token.is_empty() {
            return Err(VropsError::AuthenticationFailed(
                "token not found in response".to_string(),
            ));
        }

        let expires_at = datetime_from_epoch_ms(auth.validity);
        tracing::debug!(
            expires_at = ?expires_at,
            expires_at_label = %auth.expires_at,
            roles = auth.roles.len(),
            "authenticated successfully"
        );
        session.establish(auth.token, expires_at);
        Ok(())
    }

    /// Make a raw API request and return the response body.
    ///
    /// The path is relative to the `suite-api/api/` prefix. The session
    /// token is attached as `Authorization: vRealizeOpsToken <token>`.
    ///
    /// # Errors
    ///
    /// Returns [`VropsError::RequestFailed`] for any status other than 200,
    /// carrying the status code and body text for diagnostics.
    #[tracing::instrument(skip(self, session))]
    pub async fn request(
        &self,
        session: &Session,
        method: Method,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<u8>> {
        let url = self.base_url.join(path)?;
        tracing::debug!(url = %url, "making http request");

        let token = session.token().unwrap_or_default();
        let response = self
            .http
            .request(method, url)
            .query(params)
            .header(AUTHORIZATION, format!("{AUTH_SCHEME} {token}"))
            .send()
            .await?;
        let status = response.status();
        tracing::debug!(status = %status, "http response");

        let body = self.read_body(response).await?;
        match status.as_u16() {
            200 => Ok(body),
            code => Err(VropsError::RequestFailed {
                status: code,
                body: String::from_utf8_lossy(&body).into_owned(),
            }),
        }
    }

    /// Fetch and decode one page of resources of the given kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not satisfy
    /// the response schema under the client's decode mode.
    #[tracing::instrument(skip(self, session))]
    pub async fn resources_page(
        &self,
        session: &Session,
        resource_kind: &str,
        page: u32,
        page_size: u32,
    ) -> Result<ResourcesResponse> {
        let params = [
            ("resourceKind", resource_kind.to_string()),
            ("page", page.to_string()),
            ("pageSize", page_size.to_string()),
        ];
        let body = self.request(session, Method::GET, "resources", &params).await?;
        ResourcesResponse::from_slice(&body, self.decode_mode)
    }

    /// Fetch the full virtual machine inventory.
    ///
    /// Authenticates the session if needed, then pages through all
    /// `virtualmachine` resources sequentially.
    #[tracing::instrument(skip(self, session))]
    pub async fn virtual_machines(&self, session: &mut Session) -> Result<Vec<VirtualMachine>> {
        VirtualMachine::list_all(self, session).await
    }

    /// Read a response body up to the receiver data limit.
    ///
    /// A premature end-of-stream keeps the partial body; any other stream
    /// error is fatal.
    async fn read_body(&self, mut response: Response) -> Result<Vec<u8>> {
        let mut body = Vec::new();
        loop {
            match response.chunk().await {
                Ok(Some(chunk)) => {
                    if (body.len() + chunk.len()) as u64 > self.data_limit {
                        return Err(VropsError::ResponseTooLarge {
                            limit: self.data_limit,
                        });
                    }
                    body.extend_from_slice(&chunk);
                }
                Ok(None) => break,
                Err(err) if is_premature_eof(&err) => break,
                Err(err) => return Err(err.into()),
            }
        }
        Ok(body)
    }
}

/// Whether a stream error is a clean-looking end-of-stream after partial
/// data. Some deployments cut the connection instead of closing it.
fn is_premature_eof(err: &reqwest::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(current) = source {
        if let Some(io) = current.downcast_ref::<std::io::Error>() {
            if io.kind() == std::io::ErrorKind::UnexpectedEof {
                return true;
            }
        }
        if current.to_string().ends_with("EOF") {
            return true;
        }
        source = current.source();
    }
    false
}

/// Builder for [`VropsClient`].
///
/// Host, username and password are required; everything else has a default:
/// port 443, scheme https, certificate validation off (self-signed
/// deployment certificates are common), strict decoding, receiver data
/// limit [`RECEIVER_DATA_LIMIT`].
#[derive(Clone)]
pub struct VropsClientBuilder {
    host: String,
    port: u16,
    scheme: Scheme,
    username: String,
    password: String,
    validate_certs: bool,
    decode_mode: DecodeMode,
    data_limit: u64,
}

impl std::fmt::Debug for VropsClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VropsClientBuilder")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("scheme", &self.scheme)
            .field("username", &self.username)
            .field("validate_certs", &self.validate_certs)
            .field("decode_mode", &self.decode_mode)
            .field("data_limit", &self.data_limit)
            .finish_non_exhaustive()
    }
}

impl Default for VropsClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl VropsClientBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            host: String::new(),
            port: Scheme::Https.default_port(),
            scheme: Scheme::Https,
            username: String::new(),
            password: String::new(),
            validate_certs: false,
            decode_mode: DecodeMode::Strict,
            data_limit: RECEIVER_DATA_LIMIT,
        }
    }

    /// Target host for the API calls.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Port number for the API calls.
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Protocol for the API calls.
    #[must_use]
    pub fn scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// API username.
    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    /// API password.
    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    /// Enforce validation of server certificates.
    #[must_use]
    pub fn validate_certs(mut self, validate: bool) -> Self {
        self.validate_certs = validate;
        self
    }

    /// How response bodies are decoded. Strict by default.
    #[must_use]
    pub fn decode_mode(mut self, mode: DecodeMode) -> Self {
        self.decode_mode = mode;
        self
    }

    /// Cap on response body size in bytes.
    #[must_use]
    pub fn data_limit(mut self, limit: u64) -> Self {
        self.data_limit = limit;
        self
    }

    /// Validate the configuration and build the client.
    ///
    /// # Errors
    ///
    /// Returns [`VropsError::Config`] when the host, username or password is
    /// empty or the port is 0.
    pub fn build(self) -> Result<VropsClient> {
        if self.host.is_empty() {
            return Err(VropsError::Config("empty hostname or ip address".to_string()));
        }
        if self.port == 0 {
            return Err(VropsError::Config(format!("invalid port: {}", self.port)));
        }
        if self.username.is_empty() {
            return Err(VropsError::Config("empty username".to_string()));
        }
        if self.password.is_empty() {
            return Err(VropsError::Config("empty password".to_string()));
        }

        // Omit the port entirely when it is the scheme default.
        let base = if self.port == self.scheme.default_port() {
            format!("{}://{}/{}", self.scheme, self.host, PATH_PREFIX)
        } else {
            format!("{}://{}:{}/{}", self.scheme, self.host, self.port, PATH_PREFIX)
        };
        let base_url = Url::parse(&base)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_JSON));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        let mut http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT);
        if !self.validate_certs {
            http = http.danger_accept_invalid_certs(true);
        }
        let http = http.build()?;

        tracing::debug!(url = %base_url, "client configuration");

        Ok(VropsClient {
            http,
            base_url: Arc::new(base_url),
            username: self.username,
            password: self.password,
            decode_mode: self.decode_mode,
            data_limit: self.data_limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> VropsClientBuilder {
        VropsClient::builder()
            .host("vrops.example.com")
            .username("svc-inventory")
            .password("secret")
    }

    #[test]
    fn test_default_port_is_omitted_from_base_url() {
        let client = builder().build().unwrap();
        assert_eq!(
            client.base_url().as_str(),
            "https://vrops.example.com/suite-api/api/"
        );

        let client = builder().scheme(Scheme::Http).port(80).build().unwrap();
        assert_eq!(
            client.base_url().as_str(),
            "http://vrops.example.com/suite-api/api/"
        );
    }

    #[test]
    fn test_non_default_port_is_kept() {
        let client = builder().port(8443).build().unwrap();
        assert_eq!(
            client.base_url().as_str(),
            "https://vrops.example.com:8443/suite-api/api/"
        );
    }

    #[test]
    fn test_builder_carries_decode_mode() {
        let client = builder().build().unwrap();
        assert_eq!(client.decode_mode(), DecodeMode::Strict);

        let client = builder().decode_mode(DecodeMode::Lenient).build().unwrap();
        assert_eq!(client.decode_mode(), DecodeMode::Lenient);
    }

    #[test]
    fn test_empty_host_is_rejected() {
        let err = VropsClient::builder()
            .username("u")
            .password("p")
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            VropsError::Config(msg) if msg == "empty hostname or ip address"
        ));
    }

    #[test]
    fn test_zero_port_is_rejected() {
        let err = builder().port(0).build().unwrap_err();
        assert!(matches!(err, VropsError::Config(msg) if msg == "invalid port: 0"));
    }

    #[test]
    fn test_empty_credentials_are_rejected() {
        let err = VropsClient::builder()
            .host("vrops.example.com")
            .password("p")
            .build()
            .unwrap_err();
        assert!(matches!(err, VropsError::Config(msg) if msg == "empty username"));

        let err = VropsClient::builder()
            .host("vrops.example.com")
            .username("u")
            .build()
            .unwrap_err();
        assert!(matches!(err, VropsError::Config(msg) if msg == "empty password"));
    }

    #[test]
    fn test_scheme_parsing() {
        assert_eq!("http".parse::<Scheme>().unwrap(), Scheme::Http);
        assert_eq!("https".parse::<Scheme>().unwrap(), Scheme::Https);
        let err = "ftp".parse::<Scheme>().unwrap_err();
        assert!(matches!(
            err,
            VropsError::Config(msg)
                if msg == "supported protocols: http, https; unsupported protocol: ftp"
        ));
    }

    #[test]
    fn test_debug_redacts_password() {
        let client = builder().build().unwrap();
        let debug = format!("{client:?}");
        assert!(debug.contains("vrops.example.com"));
        assert!(!debug.contains("secret"));

        let debug = format!("{:?}", builder());
        assert!(!debug.contains("secret"));
    }
}
