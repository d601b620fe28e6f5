//! Theme preview server - renders a theme directory over HTTP.

mod routes;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::Router;
use axum::routing::get;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::info;

use themer::io::config::load_config;
use themer::io::init::ThemePaths;

use crate::state::AppState;

#[derive(Parser)]
#[command(name = "preview")]
#[command(about = "Dev server rendering a theme directory over HTTP")]
struct Args {
    /// Address to bind the server to
    #[arg(long, default_value = "127.0.0.1")]
    bind: String,

    /// Port to listen on
    #[arg(long, default_value = "3001")]
    port: u16,

    /// Theme directory (contains theme.toml and templates/)
    #[arg(long, default_value = ".")]
    theme_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("preview=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let theme_dir = args.theme_dir.canonicalize().unwrap_or(args.theme_dir);
    info!(theme_dir = %theme_dir.display(), "starting preview");

    let paths = ThemePaths::new(&theme_dir);
    let config = load_config(&paths.config_path)?;
    let state = AppState::new(theme_dir, config);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = Router::new()
        .nest("/api", routes::api_router())
        .fallback(get(routes::page))
        .layer(cors)
        .with_state(state);

    if paths.dist_dir.exists() {
        info!(dist_dir = %paths.dist_dir.display(), "serving built assets");
        app = app.nest_service("/dist", ServeDir::new(&paths.dist_dir));
    } else {
        info!(dist_dir = %paths.dist_dir.display(), "dist directory not found, templates only");
    }

    let addr: SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
