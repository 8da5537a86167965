use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tagmail::api::{self, AppState};
use tagmail::config::Config;
use tagmail::dispatch::DispatchEngine;
use tagmail::store::{ContactStore, SequenceStore};

#[derive(Parser)]
#[command(name = "tagmail")]
#[command(about = "Send email sequences to tagged contacts")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port for HTTP API
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Log emails instead of sending them
        #[arg(long)]
        dry_run: bool,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "tagmail=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve(host: &str, port: u16, dry_run: bool) -> anyhow::Result<()> {
    let config = Config::from_env();
    let (sender, from) = config.mailer(dry_run)?;

    let contacts = ContactStore::new();
    let sequences = SequenceStore::new();
    let engine = DispatchEngine::new(contacts.clone(), sequences.clone(), sender, from);
    tracing::info!(from = engine.from_address(), dry_run, "Email sender configured");

    let app = api::create_router_with_static(
        AppState::new(contacts, sequences, engine),
        &config.public_dir,
    );

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    tracing::info!("tagmail listening on http://{}:{}", host, port);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Some(Commands::Serve {
            port,
            host,
            dry_run,
        }) => serve(&host, port, dry_run).await,
        None => serve("127.0.0.1", 3000, false).await,
    }
}
