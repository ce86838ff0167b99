use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{NewRepairOrder, RepairOrder, RepairOrderChanges};
use crate::utils::errors::{not_found_error, AppError, AppResult};

/// Acceso a la tabla de órdenes de reparación
#[async_trait]
pub trait RepairOrderRepository: Send + Sync {
    /// Todas las órdenes, de la más reciente a la más antigua
    async fn list(&self) -> AppResult<Vec<RepairOrder>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<RepairOrder>>;

    async fn create(&self, order: NewRepairOrder) -> AppResult<RepairOrder>;

    async fn update(&self, id: Uuid, changes: RepairOrderChanges) -> AppResult<RepairOrder>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct PgRepairOrderRepository {
    pool: PgPool,
}

impl PgRepairOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RepairOrderRepository for PgRepairOrderRepository {
    async fn list(&self) -> AppResult<Vec<RepairOrder>> {
        sqlx::query_as::<_, RepairOrder>("SELECT * FROM repair_orders ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::from_sqlx(e, "listing repair orders"))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<RepairOrder>> {
        sqlx::query_as::<_, RepairOrder>("SELECT * FROM repair_orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_sqlx(e, "finding repair order"))
    }

    async fn create(&self, order: NewRepairOrder) -> AppResult<RepairOrder> {
        sqlx::query_as::<_, RepairOrder>(
            r#"
            INSERT INTO repair_orders (id, plate_number, description, labor_fee, service_date, part_count, part_code, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#
        )
        .bind(Uuid::new_v4())
        .bind(order.plate_number)
        .bind(order.description)
        .bind(order.labor_fee)
        .bind(order.service_date)
        .bind(order.part_count)
        .bind(order.part_code)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_sqlx(e, "creating repair order"))
    }

    async fn update(&self, id: Uuid, changes: RepairOrderChanges) -> AppResult<RepairOrder> {
        let current = self.find_by_id(id).await?
            .ok_or_else(|| not_found_error("Repair order", &id.to_string()))?;
        let next = changes.apply(current);

        sqlx::query_as::<_, RepairOrder>(
            r#"
            UPDATE repair_orders
            SET plate_number = $2, description = $3, labor_fee = $4, service_date = $5, part_count = $6, part_code = $7
            WHERE id = $1
            RETURNING *
            "#
        )
        .bind(id)
        .bind(next.plate_number)
        .bind(next.description)
        .bind(next.labor_fee)
        .bind(next.service_date)
        .bind(next.part_count)
        .bind(next.part_code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_sqlx(e, "updating repair order"))?
        .ok_or_else(|| not_found_error("Repair order", &id.to_string()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM repair_orders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::from_sqlx(e, "deleting repair order"))?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Repair order", &id.to_string()));
        }

        Ok(())
    }
}
