//! rc-lookup-server — entry point.

use std::sync::Arc;

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use rc_lookup::fetch::DEFAULT_BASE_URL;
use rc_lookup_server::config::{resolve_bind_addr, ServerConfig};
use rc_lookup_server::rest::{self, AppState};

#[derive(Parser)]
#[command(
    name = "rc-lookup-server",
    about = "Vehicle RC lookup API — registration details as JSON",
    version
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API (default).
    Serve {
        /// Bind host. Falls back to $HOST, then 0.0.0.0.
        #[arg(long)]
        host: Option<String>,

        /// Bind port. Falls back to $PORT, then 5000.
        #[arg(long)]
        port: Option<u16>,

        #[command(flatten)]
        fetch: FetchArgs,
    },

    /// Look up one RC number and print the response envelope.
    Lookup {
        /// Registration number, e.g. DL01AB1234.
        rc_number: String,

        #[command(flatten)]
        fetch: FetchArgs,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

#[derive(Args, Clone)]
struct FetchArgs {
    /// Lookup site URL prefix; the RC number is appended as a path segment.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Outbound request timeout in seconds.
    #[arg(long, default_value_t = 15, value_parser = clap::value_parser!(u64).range(1..=120))]
    timeout_secs: u64,
}

impl Default for FetchArgs {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 15,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
        fetch: FetchArgs::default(),
    }) {
        Commands::Serve { host, port, fetch } => {
            let addr = resolve_bind_addr(host.as_deref(), port)?;
            let config = ServerConfig::new(addr, &fetch.base_url, fetch.timeout_secs);
            tracing::info!("starting {} v{}", rest::SERVICE_NAME, env!("CARGO_PKG_VERSION"));
            tracing::info!("Lookup site: {}", config.fetch.base_url);

            let state = Arc::new(AppState::http(config.fetch)?);
            rest::start(config.addr, state).await?;
        }

        Commands::Lookup { rc_number, fetch } => {
            let config =
                rc_lookup_server::config::fetch_config(&fetch.base_url, fetch.timeout_secs);
            let state = AppState::http(config)?;
            let envelope = state.lookup(Some(&rc_number)).await;
            println!("{}", serde_json::to_string_pretty(&envelope)?);
            if !envelope.is_success() {
                std::process::exit(1);
            }
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "rc-lookup-server", &mut std::io::stdout());
        }
    }

    Ok(())
}
