//! Todo API server.

use std::sync::Arc;

use clap::Parser;
use conduit_todo::service::TodoService;
use conduit_todo::store::TodoStore;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Serves the todo API over HTTP
#[derive(Parser, Debug)]
#[command(name = "conduit-todo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Start with an empty store
    #[arg(long)]
    no_seed: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "info".to_string(),
            1 => "info,conduit=debug,conduit_todo=debug".to_string(),
            _ => "debug,conduit=trace,conduit_todo=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let store = TodoStore::new();
    if !cli.no_seed {
        store.seed().await;
    }
    let app = conduit_todo::app(Arc::new(TodoService::new(store)));

    let listener = TcpListener::bind((cli.host.as_str(), cli.port)).await?;
    info!(addr = %listener.local_addr()?, "todo api listening");
    for line in [
        "GET    /todos",
        "GET    /todos/:id",
        "POST   /todos",
        "POST   /todos/:id/complete",
        "POST   /todos/clear-completed",
    ] {
        info!("  {line}");
    }

    axum::serve(listener, app).await
}
