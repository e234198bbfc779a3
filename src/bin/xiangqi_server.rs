use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use xiangqi_rules::game_state::game_state::GameState;
use xiangqi_rules::server::http_api::{router, AppState};

/// Serves one shared xiangqi game over HTTP.
#[derive(Debug, Parser)]
#[command(name = "xiangqi_server", version)]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "XIANGQI_BIND", default_value = "127.0.0.1:3000")]
    bind: String,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let app = router(AppState::new(GameState::new_game()));

    let listener = TcpListener::bind(&args.bind).await?;
    info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await
}
