//! Shell errors

use mytasks_client::ClientError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    /// A user was given without a password
    #[error("no password given for user {0}")]
    MissingPassword(String),

    /// Both Basic and bearer credentials were given
    #[error("use either --user/--password or --token, not both")]
    ConflictingCredentials,

    /// The request needs stored credentials
    #[error("not logged in: pass --user and --password, or --token")]
    NotLoggedIn,

    /// `--data` is not valid JSON
    #[error("invalid JSON payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    #[error(transparent)]
    Client(#[from] ClientError),
}

impl CliError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingPassword(_) | Self::ConflictingCredentials | Self::InvalidPayload(_) => 2,
            Self::NotLoggedIn => 3,
            Self::Client(e) if e.is_unauthorized() => 3,
            Self::Client(_) => 1,
        }
    }
}
