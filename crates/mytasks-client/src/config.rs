//! Gateway configuration

use std::fmt;
use std::time::Duration;

/// Server address used when no override is provided
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Authentication material attached to every request
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// HTTP Basic username/password pair
    Basic { username: String, password: String },
    /// Bearer token
    Bearer(String),
}

impl Credentials {
    /// Basic credentials
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Bearer token credentials
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer(token.into())
    }

    pub(crate) fn apply(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self {
            Self::Basic { username, password } => req.basic_auth(username, Some(password)),
            Self::Bearer(token) => req.bearer_auth(token),
        }
    }
}

// Secrets stay out of logs and `#[instrument]` spans.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"***")
                .finish(),
            Self::Bearer(_) => f.debug_tuple("Bearer").field(&"***").finish(),
        }
    }
}

/// Gateway configuration
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    /// Root address prepended to relative request paths
    pub base_url: String,
    /// Initial credentials
    pub credentials: Option<Credentials>,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Treat `{"error_message": .., "status": ..}` bodies as failures
    pub embedded_errors: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials: None,
            timeout: Duration::from_secs(30),
            user_agent: format!("mytasks-client/{}", env!("CARGO_PKG_VERSION")),
            embedded_errors: true,
        }
    }
}

impl GatewayConfig {
    /// Create a new config with the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Create a config from an optional server override, falling back to
    /// [`DEFAULT_BASE_URL`]
    pub fn from_override(server: Option<&str>) -> Self {
        Self::new(Self::resolve_base_url(server))
    }

    /// Pick the override when present and non-empty, else the default address
    pub fn resolve_base_url(server: Option<&str>) -> String {
        match server.map(str::trim) {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Set Basic credentials
    pub fn with_basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::basic(username, password));
        self
    }

    /// Set a bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::bearer(token));
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Toggle detection of errors embedded in successful responses
    pub fn with_embedded_errors(mut self, enabled: bool) -> Self {
        self.embedded_errors = enabled;
        self
    }
}
