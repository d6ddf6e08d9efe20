//! # MyTasks shell
//!
//! Terminal front end for the MyTasks API. It owns everything the gateway
//! deliberately does not: reading the server address and credentials from
//! flags or the environment, reacting to the auth and error callbacks, and
//! printing responses.

pub mod commands;
pub mod config;
pub mod error;

pub use commands::{render, Command, Shell};
pub use config::ShellConfig;
pub use error::CliError;
