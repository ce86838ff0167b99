//! Conexión a PostgreSQL
//!
//! Este módulo abre el pool de conexiones y crea las tablas si no existen.

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::info;

use crate::config::database::DatabaseConfig;

/// Sentencias del esquema, ejecutadas en orden al arrancar
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS vehicles (
        id UUID PRIMARY KEY,
        plate_number TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        CONSTRAINT vehicles_plate_number_key UNIQUE (plate_number)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS spare_parts (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        code TEXT NOT NULL,
        quantity INTEGER NOT NULL DEFAULT 0 CHECK (quantity >= 0),
        unit_price NUMERIC(12, 2) NOT NULL DEFAULT 0 CHECK (unit_price >= 0),
        arrival_date DATE NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        CONSTRAINT spare_parts_code_key UNIQUE (code)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS repair_orders (
        id UUID PRIMARY KEY,
        plate_number TEXT NOT NULL,
        description TEXT NOT NULL,
        labor_fee NUMERIC(12, 2) CHECK (labor_fee >= 0),
        service_date DATE NOT NULL,
        part_count INTEGER NOT NULL DEFAULT 0 CHECK (part_count >= 0),
        part_code TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS repair_orders_created_at_idx ON repair_orders (created_at DESC)",
];

/// Conexión a la base de datos
pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    /// Abrir el pool y asegurar que el esquema existe
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        info!("🔗 Conectando a PostgreSQL: {}", mask_database_url(&config.url));

        let pool = config
            .create_pool()
            .await
            .context("Error connecting to PostgreSQL")?;

        run_migrations(&pool).await.context("Error creating schema")?;

        info!("✅ Base de datos lista");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Ejecutar las sentencias del esquema
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(*statement).execute(pool).await?;
    }
    Ok(())
}

/// Función helper para enmascarar la URL de la base de datos en logs
fn mask_database_url(url: &str) -> String {
    let Some(at_pos) = url.find('@') else {
        return url.to_string();
    };

    if url[..at_pos].rfind(':').is_none() {
        return url.to_string();
    }

    let protocol = match url.find("://") {
        Some(pos) => &url[..pos + 3],
        None => "",
    };
    let host = &url[at_pos + 1..];
    format!("{}***:***@{}", protocol, host)
}
