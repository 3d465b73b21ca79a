//! Sample CRUD host.
//!
//! Usage:
//!   generic-crud --bind 127.0.0.1:5000 --db ./accounts.sqlite3
//!
//! Without `--db` the host serves from a private in-memory database that is
//! discarded on exit.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use generic_crud_cli::build_app;
use generic_crud_core::{default_log_level, init_logging, DbContext, LogTarget};
use log::{error, info};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "generic-crud")]
#[command(about = "Generic CRUD sample host", version)]
struct Args {
    /// Address to serve HTTP on
    #[arg(short, long, default_value = "127.0.0.1:5000")]
    bind: SocketAddr,

    /// SQLite database file; in-memory when omitted
    #[arg(long)]
    db: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,

    /// Absolute directory for rotating log files; stderr when omitted
    #[arg(long)]
    log_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let target = match args.log_dir.as_deref() {
        Some(dir) => LogTarget::directory(dir).map_err(|err| anyhow!(err))?,
        None => LogTarget::Stderr,
    };
    let level = args.log_level.as_deref().unwrap_or(default_log_level());
    init_logging(level, target).map_err(|err| anyhow!(err))?;

    let db = match &args.db {
        Some(path) => DbContext::open(path)
            .with_context(|| format!("failed to open database `{}`", path.display()))?,
        None => DbContext::open_in_memory().context("failed to open in-memory database")?,
    };

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;
    info!(
        "event=server_start module=cli status=ok addr={} storage={}",
        args.bind,
        args.db
            .as_ref()
            .map_or_else(|| "memory".to_string(), |path| path.display().to_string())
    );

    axum::serve(listener, build_app(db))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("event=server_stop module=cli status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("event=server_stop module=cli status=error error={err}");
    }
}
