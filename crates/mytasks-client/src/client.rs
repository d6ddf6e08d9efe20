//! Request gateway implementation

use crate::{
    error::{error_message_from_body, UNKNOWN_CONNECTION_ERROR},
    ApiResponse, ClientError, Credentials, GatewayConfig, Outcome, Request, Result,
};
use parking_lot::RwLock;
use reqwest::{header, Client};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Handler invoked when the server answers 401
pub type AuthCallback = Arc<dyn Fn() + Send + Sync>;

/// Handler receiving the message of any other failure
pub type ErrorCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Mutable part of the gateway. Cloned at the start of every call.
#[derive(Clone, Default)]
struct Session {
    credentials: Option<Credentials>,
    auth_callback: Option<AuthCallback>,
    error_callback: Option<ErrorCallback>,
}

/// Gateway to the MyTasks REST API.
///
/// Resolves paths against the base URL, attaches the stored credentials and
/// routes failures to the registered callbacks:
///
/// 1. 401 with an auth callback: the callback runs and the call yields `Ok(None)`.
/// 2. Any other status with an error callback: the callback gets the server
///    message and the call yields `Ok(None)`.
/// 3. No response with an error callback: the callback gets
///    [`UNKNOWN_CONNECTION_ERROR`] and the call yields `Ok(None)`.
/// 4. Otherwise the failure is returned as `Err`.
pub struct RequestGateway {
    base_url: String,
    embedded_errors: bool,
    http: Client,
    session: RwLock<Session>,
}

impl RequestGateway {
    /// Create a new gateway with the given configuration
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        let user_agent = header::HeaderValue::from_str(&config.user_agent)
            .map_err(|e| ClientError::Config(format!("invalid user agent: {}", e)))?;
        headers.insert(header::USER_AGENT, user_agent);

        let http = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(ClientError::Http)?;

        debug!("Gateway configured for {}", config.base_url);

        Ok(Self {
            base_url: config.base_url,
            embedded_errors: config.embedded_errors,
            http,
            session: RwLock::new(Session {
                credentials: config.credentials,
                ..Default::default()
            }),
        })
    }

    /// Create with the default server address
    pub fn default_local() -> Result<Self> {
        Self::new(GatewayConfig::default())
    }

    /// Base URL prepended to relative paths
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL a request for `path` is dispatched to
    pub fn resolve_url(&self, path: &str) -> String {
        resolve_url(&self.base_url, path)
    }

    /// Whether credentials are currently stored
    pub fn is_authenticated(&self) -> bool {
        self.session.read().credentials.is_some()
    }

    /// Replace the stored credentials and auth callback together
    pub fn configure(&self, credentials: Option<Credentials>, auth_callback: Option<AuthCallback>) {
        let mut session = self.session.write();
        session.credentials = credentials;
        session.auth_callback = auth_callback;
    }

    /// Register or clear the generic error callback
    pub fn on_error(&self, callback: Option<ErrorCallback>) {
        self.session.write().error_callback = callback;
    }

    // ==================== Verbs ====================

    /// GET a path or absolute URL
    #[instrument(skip(self))]
    pub async fn get(&self, path: &str) -> Result<Option<ApiResponse>> {
        self.call(Request::get(path)).await
    }

    /// POST a JSON body
    #[instrument(skip(self, body))]
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Option<ApiResponse>> {
        self.call(Request::post(path, body)?).await
    }

    /// PUT a JSON body
    #[instrument(skip(self, body))]
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Option<ApiResponse>> {
        self.call(Request::put(path, body)?).await
    }

    /// DELETE a path or absolute URL
    #[instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> Result<Option<ApiResponse>> {
        self.call(Request::delete(path)).await
    }

    /// Validate credentials against `GET {base_url}/login`.
    ///
    /// Uses the supplied credentials, not the stored ones, and leaves the
    /// configuration and callbacks untouched.
    #[instrument(skip(self, credentials))]
    pub async fn login(&self, credentials: &Credentials) -> Result<ApiResponse> {
        self.dispatch(&Request::get("/login"), Some(credentials))
            .await
            .into_result()
    }

    /// Issue a request and classify the result without invoking callbacks
    #[instrument(skip_all, fields(method = %request.method, path = %request.path))]
    pub async fn send(&self, request: Request) -> Outcome<ApiResponse> {
        let credentials = self.session.read().credentials.clone();
        self.dispatch(&request, credentials.as_ref()).await
    }

    /// Issue a request and apply the callback chain
    pub async fn call(&self, request: Request) -> Result<Option<ApiResponse>> {
        // Snapshot so a reconfiguration does not affect this call.
        let session = self.session.read().clone();
        let outcome = self.dispatch(&request, session.credentials.as_ref()).await;
        absorb(outcome, &session)
    }

    // ==================== Helper Methods ====================

    async fn dispatch(&self, request: &Request, credentials: Option<&Credentials>) -> Outcome<ApiResponse> {
        let url = self.resolve_url(&request.path);
        info!("{} {}", request.method, url);

        let mut req = self.http.request(request.method.into(), &url);
        if let Some(credentials) = credentials {
            req = credentials.apply(req);
        }
        if let Some(body) = &request.body {
            req = req.json(body);
        }

        let response = match req.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("{} {} failed: {}", request.method, url, e);
                return Outcome::TransportError(e);
            }
        };

        let status = response.status();
        let url = response.url().to_string();
        let headers = response.headers().clone();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => return Outcome::TransportError(e),
        };

        if !status.is_success() {
            let message = error_message_from_body(&body, status.as_u16());
            debug!("{} {} answered {}: {}", request.method, url, status, message);
            return Outcome::from_status(status.as_u16(), message);
        }

        let response = ApiResponse {
            url,
            status,
            headers,
            body,
        };

        if self.embedded_errors {
            if let Some((status, message)) = response.embedded_error() {
                debug!("{} {} embedded error {}: {}", request.method, response.url, status, message);
                return Outcome::from_status(status, message);
            }
        }

        Outcome::Success(response)
    }
}

/// Prefix `path` with `base_url` unless it already starts with `http`.
///
/// Plain concatenation: no slash is added or removed.
pub fn resolve_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http") {
        path.to_string()
    } else {
        format!("{}{}", base_url, path)
    }
}

fn absorb(outcome: Outcome<ApiResponse>, session: &Session) -> Result<Option<ApiResponse>> {
    match outcome {
        Outcome::Success(response) => Ok(Some(response)),
        Outcome::AuthRequired => {
            if let Some(callback) = &session.auth_callback {
                debug!("Authentication required, invoking auth callback");
                callback();
                Ok(None)
            } else {
                forward(ClientError::Unauthorized, session)
            }
        }
        Outcome::ApplicationError { status, message } => {
            forward(ClientError::Api { status, message }, session)
        }
        Outcome::TransportError(e) => forward(ClientError::Http(e), session),
    }
}

fn forward(error: ClientError, session: &Session) -> Result<Option<ApiResponse>> {
    let Some(callback) = &session.error_callback else {
        return Err(error);
    };

    let message = match error {
        ClientError::Api { message, .. } => message,
        ClientError::Http(_) => UNKNOWN_CONNECTION_ERROR.to_string(),
        other => other.to_string(),
    };
    callback(message.as_str());
    Ok(None)
}
