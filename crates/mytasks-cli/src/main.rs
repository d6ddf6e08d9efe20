//! MyTasks - command line client for the MyTasks task manager

use clap::Parser;
use mytasks_cli::{Command, Shell, ShellConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "mytasks")]
#[command(about = "Command line client for the MyTasks task manager")]
#[command(version)]
struct Args {
    /// MyTasks server address (default http://127.0.0.1:5000)
    #[arg(short, long, env = "MYTASKS_SERVER", global = true)]
    server: Option<String>,

    /// User id for Basic authentication
    #[arg(short, long, env = "MYTASKS_USER", global = true)]
    user: Option<String>,

    /// Password for Basic authentication
    #[arg(short, long, env = "MYTASKS_PASSWORD", hide_env_values = true, global = true)]
    password: Option<String>,

    /// Bearer token, instead of user and password
    #[arg(long, env = "MYTASKS_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "MYTASKS_TIMEOUT", global = true)]
    timeout_secs: Option<u64>,

    /// Fail with an error instead of reporting failures through the error handler
    #[arg(long, global = true)]
    raw_errors: bool,

    /// Enable debug logging
    #[arg(short, long, env = "MYTASKS_DEBUG", global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Logs go to stderr so responses can be piped
    let log_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| format!("mytasks_client={0},mytasks_cli={0}", log_level).into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ShellConfig {
        server: args.server,
        user: args.user,
        password: args.password,
        token: args.token,
        timeout_secs: args.timeout_secs,
        raw_errors: args.raw_errors,
    };

    let shell = match Shell::new(config) {
        Ok(shell) => shell,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    };

    match shell.run(args.command).await {
        Ok(Some(output)) => println!("{}", output),
        Ok(None) if shell.auth_failed() => std::process::exit(3),
        Ok(None) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
