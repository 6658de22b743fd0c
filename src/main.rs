//! CLI for PopSub Discovery
//!
//! Subcommands:
//! - `server`: run the discovery service
//! - `probe`: register a publisher and print what the service reports (useful for smoke tests)

use clap::{Args, Parser, Subcommand};
use popsub_discovery::client::DiscoveryClient;
use popsub_discovery::config::{CENTRALIZED, Overrides, load_config_from};
use popsub_discovery::dispatch::Dispatcher;
use popsub_discovery::registry::{Registrant, Role};
use popsub_discovery::transport::start_websocket_server;
use popsub_discovery::utils::error::Result;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "popsub-discovery")]
struct Cli {
    /// Log level: error, warn, info, debug, trace (or 10-50)
    #[arg(short = 'l', long, default_value = "info", global = true)]
    loglevel: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the discovery service
    Server(ServerArgs),
    /// Register as a publisher, then print readiness and lookup results
    Probe {
        /// Discovery service URL to connect to (default: ws://127.0.0.1:5555)
        #[arg(long, default_value = "ws://127.0.0.1:5555")]
        url: String,
        #[arg(long, default_value = "probe")]
        id: String,
        #[arg(long, default_value = "127.0.0.1")]
        addr: String,
        #[arg(long, default_value_t = 5577)]
        port: u16,
        /// Topic to publish; repeat for several
        #[arg(long = "topic", default_value = "probe")]
        topics: Vec<String>,
    },
}

#[derive(Args)]
struct ServerArgs {
    /// Total number of publishers in the system
    #[arg(short = 'P', long)]
    pubs: Option<usize>,
    /// Total number of subscribers in the system
    #[arg(short = 'S', long)]
    subs: Option<usize>,
    /// Configuration file (default: config/default.ini, if present)
    #[arg(short, long)]
    config: Option<String>,
    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,
    /// Interface to bind
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    popsub_discovery::utils::logging::init(&cli.loglevel);

    let result = match cli.command {
        Command::Server(args) => run_server(args).await,
        Command::Probe {
            url,
            id,
            addr,
            port,
            topics,
        } => run_probe(&url, Registrant::new(id, addr, port), &topics).await,
    };

    if let Err(e) = result {
        error!("{e}");
        std::process::exit(1);
    }
}

async fn run_server(args: ServerArgs) -> Result<()> {
    let settings = load_config_from(args.config.as_deref())?.apply(Overrides {
        host: args.host,
        port: args.port,
        publishers: args.pubs,
        subscribers: args.subs,
    });

    if !settings.discovery.strategy.eq_ignore_ascii_case(CENTRALIZED) {
        warn!(
            "Discovery strategy '{}' is not supported; using {CENTRALIZED}",
            settings.discovery.strategy
        );
    }
    info!(
        "Expecting {} publisher(s) and {} subscriber(s); dissemination: {}",
        settings.discovery.publishers,
        settings.discovery.subscribers,
        settings.dissemination.strategy
    );

    let dispatcher = Arc::new(Mutex::new(Dispatcher::new(
        settings.dissemination.strategy,
        settings.discovery.publishers,
        settings.discovery.subscribers,
    )));

    tokio::select! {
        res = start_websocket_server(settings.addr(), dispatcher) => {
            res?;
            error!("Discovery server exited unexpectedly.");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting gracefully.");
        }
    }

    Ok(())
}

async fn run_probe(url: &str, me: Registrant, topics: &[String]) -> Result<()> {
    let mut client = DiscoveryClient::connect(url).await?;

    let status = client.register(Role::Publisher, me, topics).await?;
    println!("Register: {status:?}");

    let ready = client.wait_until_ready(Duration::from_secs(1), 5).await?;
    let readiness = client.is_ready().await?;
    println!("Ready: {ready} ({})", readiness.reason.describe());

    for publisher in client.lookup_publishers(topics).await? {
        println!("Publisher for {topics:?}: {publisher}");
    }
    for publisher in client.all_publishers().await? {
        println!("Known publisher: {publisher}");
    }

    client.close().await
}
