//! Basic usage of the MyTasks client
//!
//! This demo:
//! - validates credentials with `login` before storing them
//! - registers auth and error handlers
//! - creates a group, a checklist and an item, then reads them back
//!
//! Run with: cargo run --example basic_usage
//! (set MYTASKS_SERVER, MYTASKS_USER and MYTASKS_PASSWORD first)

use mytasks_client::{
    models::{NewChecklist, NewGroup, NewItem},
    Credentials, GatewayConfig, RequestGateway,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    // The gateway never reads the environment itself
    let server = std::env::var("MYTASKS_SERVER").ok();
    let config = GatewayConfig::from_override(server.as_deref());
    let gateway = RequestGateway::new(config)?;
    println!("Using {}", gateway.base_url());

    let user = std::env::var("MYTASKS_USER").unwrap_or_else(|_| "1".to_string());
    let password = std::env::var("MYTASKS_PASSWORD").unwrap_or_default();
    let credentials = Credentials::basic(user, password);

    let users = gateway.verify_credentials(&credentials).await?;
    println!("Logged in, {} user(s) visible", users.len());

    gateway.configure(
        Some(credentials),
        Some(Arc::new(|| eprintln!("Session expired, please log in again"))),
    );
    gateway.on_error(Some(Arc::new(|msg: &str| eprintln!("Server error: {}", msg))));

    let Some(group) = gateway.create_group(&NewGroup::new("Home")).await? else {
        return Ok(());
    };
    println!("Created group {} ({})", group.name, group.id);

    let Some(checklist) = gateway
        .create_checklist(&NewChecklist::new("Groceries", &group.id))
        .await?
    else {
        return Ok(());
    };
    println!("Created checklist {} ({})", checklist.name, checklist.id);

    for name in ["milk", "bread", "coffee"] {
        if let Some(item) = gateway.create_item(&NewItem::new(name, &checklist.id)).await? {
            println!("  + {} ({})", item.name, item.id);
        }
    }

    if let Some(checklist) = gateway.checklist(&checklist.id).await? {
        println!(
            "{}:\n{}",
            checklist.name,
            serde_json::to_string_pretty(&checklist.items)?
        );
    }

    Ok(())
}
