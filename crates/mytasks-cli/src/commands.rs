//! Command dispatch

use crate::{config::ShellConfig, error::CliError};
use clap::Subcommand;
use mytasks_client::{ApiResponse, AuthCallback, ErrorCallback, RequestGateway};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Check the credentials against /login
    Login,
    /// GET a path or URL
    Get { path: String },
    /// POST a JSON payload
    Post {
        path: String,
        /// JSON body, `{}` when omitted
        #[arg(long)]
        data: Option<String>,
    },
    /// PUT a JSON payload
    Put {
        path: String,
        /// JSON body, `{}` when omitted
        #[arg(long)]
        data: Option<String>,
    },
    /// DELETE a path or URL
    Delete { path: String },
    /// List users
    Users,
    /// Show a user and its groups
    User { id: String },
    /// Show a group and its checklists
    Group { id: String },
    /// Show a checklist and its items
    Checklist { id: String },
    /// Show an item
    Item { id: String },
}

/// Gateway plus the callbacks a terminal session registers on it
pub struct Shell {
    gateway: Arc<RequestGateway>,
    config: ShellConfig,
    auth_failed: Arc<AtomicBool>,
    error_seen: Arc<AtomicBool>,
}

impl Shell {
    /// Build the gateway and register credentials and callbacks
    pub fn new(config: ShellConfig) -> Result<Self, CliError> {
        let credentials = config.credentials()?;
        let gateway = Arc::new(RequestGateway::new(config.gateway_config())?);
        info!("Using MyTasks server at {}", gateway.base_url());

        let auth_failed = Arc::new(AtomicBool::new(false));
        let flag = auth_failed.clone();
        let on_auth: AuthCallback = Arc::new(move || {
            flag.store(true, Ordering::SeqCst);
            eprintln!("Authentication required: log in again with --user/--password or --token");
        });
        gateway.configure(credentials, Some(on_auth));

        let error_seen = Arc::new(AtomicBool::new(false));
        if !config.raw_errors {
            let flag = error_seen.clone();
            let on_error: ErrorCallback = Arc::new(move |message: &str| {
                flag.store(true, Ordering::SeqCst);
                eprintln!("Error: {}", message);
            });
            gateway.on_error(Some(on_error));
        }

        Ok(Self {
            gateway,
            config,
            auth_failed,
            error_seen,
        })
    }

    pub fn gateway(&self) -> &Arc<RequestGateway> {
        &self.gateway
    }

    /// Whether the auth callback ran during this session
    pub fn auth_failed(&self) -> bool {
        self.auth_failed.load(Ordering::SeqCst)
    }

    /// Whether the error callback ran during this session
    pub fn error_seen(&self) -> bool {
        self.error_seen.load(Ordering::SeqCst)
    }

    /// Run a command, returning the text to print.
    ///
    /// `None` means a callback already reported the failure.
    pub async fn run(&self, command: Command) -> Result<Option<String>, CliError> {
        debug!("Running {:?}", command);
        let gateway = &self.gateway;

        match command {
            Command::Login => {
                let credentials = self.config.credentials()?.ok_or(CliError::NotLoggedIn)?;
                let response = gateway.login(&credentials).await?;
                Ok(Some(render(&response)))
            }
            Command::Get { path } => Ok(gateway.get(&path).await?.as_ref().map(render)),
            Command::Post { path, data } => {
                let body = payload(data.as_deref())?;
                Ok(gateway.post(&path, &body).await?.as_ref().map(render))
            }
            Command::Put { path, data } => {
                let body = payload(data.as_deref())?;
                Ok(gateway.put(&path, &body).await?.as_ref().map(render))
            }
            Command::Delete { path } => Ok(gateway.delete(&path).await?.as_ref().map(render)),
            Command::Users => pretty(gateway.users().await?),
            Command::User { id } => pretty(gateway.user(&id).await?),
            Command::Group { id } => pretty(gateway.group(&id).await?),
            Command::Checklist { id } => pretty(gateway.checklist(&id).await?),
            Command::Item { id } => pretty(gateway.item(&id).await?),
        }
    }
}

/// Pretty JSON when the body parses, raw text otherwise
pub fn render(response: &ApiResponse) -> String {
    match response.json::<serde_json::Value>() {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|_| response.text()),
        Err(_) => response.text(),
    }
}

fn pretty<T: Serialize>(value: Option<T>) -> Result<Option<String>, CliError> {
    value
        .map(|v| serde_json::to_string_pretty(&v).map_err(CliError::from))
        .transpose()
}

fn payload(data: Option<&str>) -> Result<serde_json::Value, CliError> {
    match data {
        Some(raw) => Ok(serde_json::from_str(raw)?),
        None => Ok(serde_json::json!({})),
    }
}
