//! z/OSMF dataset CLI.
//!
//! This is the entry point for the `zosmf-ds` binary.

mod commands;
mod state;

use std::path::PathBuf;
use std::sync::Arc;

use clap::builder::BoolishValueParser;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use zosmf_client::{ConnectionConfig, HttpDatasetClient};
use zosmf_lifecycle::LifecycleService;

use commands::Command;

/// Manage sequential datasets through the z/OSMF REST files API.
#[derive(Parser, Debug)]
#[command(name = "zosmf-ds")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// z/OSMF base URL, e.g. https://mainframe.example.com:443.
    #[arg(long, env = "ZOSMF_HOST")]
    host: String,

    /// z/OSMF user ID.
    #[arg(long, env = "ZOSMF_USERNAME")]
    username: String,

    /// z/OSMF password.
    #[arg(long, env = "ZOS_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Accept any server certificate. Only for test systems.
    #[arg(
        long,
        env = "ZOSMF_INSECURE_SKIP_TLS_VERIFY",
        value_parser = BoolishValueParser::new()
    )]
    insecure_skip_tls_verify: bool,

    /// Per-request timeout in seconds.
    #[arg(long, env = "ZOSMF_TIMEOUT_SECONDS", default_value_t = 10)]
    timeout_seconds: u64,

    /// Where confirmed dataset records are kept between runs.
    #[arg(long, env = "ZOSMF_STATE_FILE", default_value = "zosmf-state.json")]
    state_file: PathBuf,

    /// Enable debug logging.
    #[arg(long, default_value = "false")]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    fn connection_config(&self) -> ConnectionConfig {
        ConnectionConfig {
            host: self.host.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            insecure_skip_tls_verify: self.insecure_skip_tls_verify,
            timeout_seconds: self.timeout_seconds,
        }
    }
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("zosmf_client=debug,zosmf_lifecycle=debug,zosmf_ds=debug,warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.debug);

    let connection = args.connection_config().into_connection()?;
    tracing::debug!(?connection, "Connecting to z/OSMF");

    let client = HttpDatasetClient::new(connection)?;
    let service = LifecycleService::new(Arc::new(client));

    let mut stdout = std::io::stdout();
    commands::run(&service, &args.state_file, args.command, &mut stdout).await
}
