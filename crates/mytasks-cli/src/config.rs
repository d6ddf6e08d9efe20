//! Shell configuration

use crate::error::CliError;
use mytasks_client::{Credentials, GatewayConfig};
use serde::Serialize;
use std::time::Duration;

/// Settings gathered from flags, environment and `.env`
#[derive(Clone, Debug, Default, Serialize)]
pub struct ShellConfig {
    /// Server address override
    pub server: Option<String>,
    /// Basic auth user id
    pub user: Option<String>,
    /// Basic auth password
    #[serde(skip_serializing)]
    pub password: Option<String>,
    /// Bearer token
    #[serde(skip_serializing)]
    pub token: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
    /// Report failures as errors instead of routing them to the error callback
    pub raw_errors: bool,
}

impl ShellConfig {
    /// Credentials to store on the gateway, if any
    pub fn credentials(&self) -> Result<Option<Credentials>, CliError> {
        match (&self.user, &self.password, &self.token) {
            (Some(_), _, Some(_)) => Err(CliError::ConflictingCredentials),
            (Some(user), Some(password), None) => Ok(Some(Credentials::basic(user, password))),
            (Some(user), None, None) => Err(CliError::MissingPassword(user.clone())),
            (None, _, Some(token)) => Ok(Some(Credentials::bearer(token))),
            (None, _, None) => Ok(None),
        }
    }

    /// Gateway configuration without credentials. `Shell` stores those on
    /// the gateway as given; only the `login` command checks them against
    /// the server
    pub fn gateway_config(&self) -> GatewayConfig {
        let mut config = GatewayConfig::from_override(self.server.as_deref());
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }
}
