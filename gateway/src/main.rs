use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use link_budget::{modcod_table, EARTH_RADIUS_KM, GEO_RADIUS_KM};

mod config;
mod routes;

use config::GatewayConfig;
use routes::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "cni_gateway=debug,link_budget=info,info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = GatewayConfig::from_env()?;

    let app = routes::router(AppState::new())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.socket_addr();
    tracing::info!("📡 CNI Gateway starting on {}", addr);
    tracing::info!(
        "   Geometry: spherical Earth {} km, GEO radius {} km",
        EARTH_RADIUS_KM,
        GEO_RADIUS_KM
    );
    tracing::info!("   MODCOD table: {} DVB-S2 entries", modcod_table().len());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
