use anyhow::{Context, Result};
use axum::Router;
use clap::Parser;
use linkrank_core::{RankConfig, ZeroInflow};
use server::build_app;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Corpus path (JSON/JSONL file or directory)
    #[arg(long, default_value = "./corpus")]
    corpus: String,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// Number of rank passes to run
    #[arg(long, default_value_t = 10)]
    iterations: usize,
    /// Probability of following a link rather than jumping to a random page
    #[arg(long, default_value_t = 0.85)]
    damping: f64,
    /// Keep the teleport floor for nodes nothing links to instead of dropping them
    #[arg(long, default_value_t = false)]
    floor_unreached: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let config = RankConfig {
        iterations: args.iterations,
        damping: args.damping,
        zero_inflow: if args.floor_unreached { ZeroInflow::Floor } else { ZeroInflow::Drop },
    };
    let app: Router = build_app(&args.corpus, &config)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await.with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
