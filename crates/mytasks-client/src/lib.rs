//! # MyTasks Client SDK
//!
//! A client SDK for the MyTasks task-management REST API.
//!
//! ## Features
//!
//! - **Path resolution**: relative paths are prefixed with the base URL,
//!   absolute `http(s)` URLs are used as-is
//! - **Credentials**: HTTP Basic or bearer token on every request
//! - **Auth callback**: 401 responses run a handler instead of failing the call
//! - **Typed resources**: users, groups, checklists and items
//!
//! ## Example
//!
//! ```rust,ignore
//! use mytasks_client::{Credentials, GatewayConfig, RequestGateway};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let gateway = RequestGateway::new(GatewayConfig::new("http://127.0.0.1:5000"))?;
//!
//!     // Validate before storing
//!     let credentials = Credentials::basic("1", "secret");
//!     gateway.login(&credentials).await?;
//!     gateway.configure(Some(credentials), Some(Arc::new(|| eprintln!("please log in again"))));
//!
//!     if let Some(response) = gateway.get("/groups/5b1f").await? {
//!         println!("{}", response.text());
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
pub mod models;
mod outcome;
mod resources;
mod types;

pub use client::{resolve_url, AuthCallback, ErrorCallback, RequestGateway};
pub use config::{Credentials, GatewayConfig, DEFAULT_BASE_URL};
pub use error::{ClientError, Result, UNKNOWN_CONNECTION_ERROR};
pub use outcome::Outcome;
pub use types::*;
