//! encore-api - Content-management backend for a musician's promotional site
//!
//! CRUD over albums, videos, and tours; singleton settings/hero/about
//! documents; upload pass-through to the media host.

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use encore_api::{build_router, media::MediaHost, AppState};
use encore_common::config::{self, MediaHostConfig};

#[derive(Parser, Debug)]
#[command(name = "encore-api", version, about = "Artist website backend")]
struct Args {
    /// Root folder holding the database (overrides ENCORE_ROOT and config file)
    #[arg(long)]
    root_folder: Option<String>,

    /// Port to listen on
    #[arg(long, env = "ENCORE_PORT", default_value_t = 5000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber before anything that can log
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting encore-api v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let root_folder = config::resolve_root_folder(args.root_folder.as_deref());
    let db_path = root_folder.join(config::DATABASE_FILE);
    info!("Database path: {}", db_path.display());

    let pool = encore_common::db::init_database(&db_path).await?;

    let media = match MediaHostConfig::from_env() {
        Some(cfg) => {
            info!("Media host configured (cloud: {})", cfg.cloud_name);
            Some(MediaHost::new(cfg))
        }
        None => {
            warn!("CLOUDINARY_CLOUD_NAME not set; upload endpoints will return an error");
            None
        }
    };

    let state = AppState::new(pool, media);
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("encore-api listening on http://{}", addr);
    info!("Health check: http://{}/api/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
