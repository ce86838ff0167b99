use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{NewVehicle, Vehicle, VehicleChanges};
use crate::utils::errors::{not_found_error, AppError, AppResult};

/// Acceso a la tabla de vehículos
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// Todos los vehículos, del más reciente al más antiguo
    async fn list(&self) -> AppResult<Vec<Vehicle>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>>;

    /// `true` si otra fila (distinta de `exclude`) ya usa la matrícula
    async fn plate_taken(&self, plate_number: &str, exclude: Option<Uuid>) -> AppResult<bool>;

    async fn create(&self, vehicle: NewVehicle) -> AppResult<Vehicle>;

    async fn update(&self, id: Uuid, changes: VehicleChanges) -> AppResult<Vehicle>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleRepository for PgVehicleRepository {
    async fn list(&self) -> AppResult<Vec<Vehicle>> {
        sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::from_sqlx(e, "listing vehicles"))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_sqlx(e, "finding vehicle"))
    }

    async fn plate_taken(&self, plate_number: &str, exclude: Option<Uuid>) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM vehicles WHERE plate_number = $1 AND ($2::uuid IS NULL OR id <> $2))"
        )
        .bind(plate_number)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_sqlx(e, "checking plate number"))?;

        Ok(result.0)
    }

    async fn create(&self, vehicle: NewVehicle) -> AppResult<Vehicle> {
        sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (id, plate_number, created_at)
            VALUES ($1, $2, $3)
            RETURNING *
            "#
        )
        .bind(Uuid::new_v4())
        .bind(vehicle.plate_number)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_sqlx(e, "creating vehicle"))
    }

    async fn update(&self, id: Uuid, changes: VehicleChanges) -> AppResult<Vehicle> {
        let current = self.find_by_id(id).await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))?;
        let next = changes.apply(current);

        sqlx::query_as::<_, Vehicle>(
            "UPDATE vehicles SET plate_number = $2 WHERE id = $1 RETURNING *"
        )
        .bind(id)
        .bind(next.plate_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_sqlx(e, "updating vehicle"))?
        .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::from_sqlx(e, "deleting vehicle"))?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Vehicle", &id.to_string()));
        }

        Ok(())
    }
}
