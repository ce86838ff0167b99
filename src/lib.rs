//! Backend del dashboard de un almacén de autopartes
//!
//! Vehículos, repuestos y órdenes de reparación con CRUD por HTTP,
//! validación de claves únicas y descuento de stock al crear órdenes.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::info;

use config::database::DatabaseConfig;
use config::environment::{EnvironmentConfig, StoreBackend};
use database::DatabaseConnection;
use middleware::cors::cors_layer;
use repositories::Repositories;
use state::AppState;

/// Abrir el almacén configurado y construir el estado de la aplicación
pub async fn bootstrap(config: EnvironmentConfig) -> Result<AppState> {
    let repositories = match config.store_backend {
        StoreBackend::Postgres => {
            let db_config = DatabaseConfig::from_environment(&config)?;
            let connection = DatabaseConnection::new(&db_config).await?;
            Repositories::postgres(connection.pool().clone())
        }
        StoreBackend::Memory => {
            info!("🧪 Usando almacén en memoria (los datos no se persisten)");
            Repositories::in_memory()
        }
    };

    Ok(AppState::new(repositories, config))
}

/// Router completo de la API
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health))
        .nest("/api/vehicles", routes::vehicle_routes::create_vehicle_router())
        .nest("/api/spare-parts", routes::spare_part_routes::create_spare_part_router())
        .nest("/api/orders", routes::repair_order_routes::create_repair_order_router())
        .nest("/api/dashboard", routes::dashboard_routes::create_dashboard_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Endpoint de salud
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
