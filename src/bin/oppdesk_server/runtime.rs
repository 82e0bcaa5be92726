use std::net::SocketAddr;

use clap::Parser;
use oppdesk::logging;
use tracing::Level;

use super::*;

#[derive(Parser)]
#[command(name = "oppdesk-server")]
#[command(about = "Opportunity REST backend (development, in-memory)", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8000")]
    addr: SocketAddr,

    /// Write bound address to this file (dev/test convenience)
    #[arg(long)]
    addr_file: Option<PathBuf>,

    /// JSON array of opportunities to load at startup
    #[arg(long)]
    seed: Option<PathBuf>,

    /// JSON array of opportunity payloads that a sync run upserts; enables sync
    #[arg(long)]
    sync_source: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

pub(super) async fn run() -> Result<()> {
    let args = Args::parse();
    logging::init_stderr_at(if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    });

    let store = match &args.seed {
        Some(path) => Store::new(load_seed(path)?),
        None => Store::default(),
    };
    tracing::info!(records = store.len(), "store ready");
    if let Some(source) = &args.sync_source {
        tracing::info!(source = %source.display(), "sync enabled");
    }

    let app = routes::router(AppState::new(store, args.sync_source.clone()));

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("bind {}", args.addr))?;

    let local_addr = listener.local_addr().context("read listener local addr")?;
    eprintln!("oppdesk-server listening on {}", local_addr);

    if let Some(addr_file) = &args.addr_file {
        std::fs::write(addr_file, local_addr.to_string())
            .with_context(|| format!("write addr file {}", addr_file.display()))?;
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

fn load_seed(path: &std::path::Path) -> Result<Vec<Opportunity>> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read seed file {}", path.display()))?;
    let mut records: Vec<Opportunity> = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse seed file {}", path.display()))?;
    for record in &mut records {
        if record.id.is_empty() {
            record.id = generate_id()?;
        }
    }
    Ok(records)
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
