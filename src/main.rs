use anyhow::{Context, Result};
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use dotenvy::dotenv;

use autoparts_dashboard::config::environment::EnvironmentConfig;
use autoparts_dashboard::{bootstrap, build_router};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🔧 Auto-parts warehouse dashboard API");
    info!("=====================================");

    let config = EnvironmentConfig::from_env().context("Invalid configuration")?;
    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("Invalid listen address {}", config.server_addr()))?;

    info!("⚙️ Entorno: {} | almacén: {:?}", config.environment, config.store_backend);
    if !config.is_development() && config.cors_origins.is_empty() {
        warn!("⚠️ CORS abierto a cualquier origen fuera de desarrollo; configure CORS_ORIGINS");
    }

    let state = match bootstrap(config).await {
        Ok(state) => state,
        Err(e) => {
            error!("❌ Error inicializando el almacén: {:#}", e);
            return Err(e);
        }
    };

    let app = build_router(state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("   GET  /api/dashboard - Resumen del dashboard");
    info!("🚗 Vehicles:    GET|POST /api/vehicles, GET|PUT|DELETE /api/vehicles/:id");
    info!("🔧 Spare parts: GET|POST /api/spare-parts, GET|PUT|DELETE /api/spare-parts/:id");
    info!("🛠️ Orders:      GET|POST /api/orders, GET|PUT|DELETE /api/orders/:id");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
