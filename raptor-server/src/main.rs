use std::path::PathBuf;

use clap::Parser;
use raptor_server::build_router;
use raptor_server::config::ServerConfig;
use raptor_server::state::AppState;

#[derive(Debug, Parser)]
#[command(name = "raptor-server", about = "RAPTOR transit journey query server")]
struct Args {
    /// Path to a TOML config file. Missing file falls back to defaults.
    #[arg(long, default_value = "raptor-server.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = ServerConfig::load(&args.config)?;
    let listen_addr = config.listen_addr;

    let state = AppState::new(&config);
    state.reload().await?;
    tracing::info!(snapshot = %config.timetable_snapshot_path.display(), "timetable loaded");

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    tracing::info!(%listen_addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
