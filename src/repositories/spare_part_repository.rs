use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{NewSparePart, SparePart, SparePartChanges};
use crate::utils::errors::{not_found_error, AppError, AppResult};

/// Acceso a la tabla de repuestos
#[async_trait]
pub trait SparePartRepository: Send + Sync {
    /// Todos los repuestos, del más reciente al más antiguo
    async fn list(&self) -> AppResult<Vec<SparePart>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<SparePart>>;

    /// `true` si otra fila (distinta de `exclude`) ya usa el código
    async fn code_taken(&self, code: &str, exclude: Option<Uuid>) -> AppResult<bool>;

    async fn create(&self, part: NewSparePart) -> AppResult<SparePart>;

    async fn update(&self, id: Uuid, changes: SparePartChanges) -> AppResult<SparePart>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Restar `count` unidades al repuesto con ese código, con suelo en cero.
    ///
    /// Devuelve `None` si ningún repuesto tiene el código.
    async fn decrement_stock(&self, code: &str, count: i32) -> AppResult<Option<SparePart>>;
}

pub struct PgSparePartRepository {
    pool: PgPool,
}

impl PgSparePartRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SparePartRepository for PgSparePartRepository {
    async fn list(&self) -> AppResult<Vec<SparePart>> {
        sqlx::query_as::<_, SparePart>("SELECT * FROM spare_parts ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::from_sqlx(e, "listing spare parts"))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<SparePart>> {
        sqlx::query_as::<_, SparePart>("SELECT * FROM spare_parts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_sqlx(e, "finding spare part"))
    }

    async fn code_taken(&self, code: &str, exclude: Option<Uuid>) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM spare_parts WHERE code = $1 AND ($2::uuid IS NULL OR id <> $2))"
        )
        .bind(code)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_sqlx(e, "checking spare part code"))?;

        Ok(result.0)
    }

    async fn create(&self, part: NewSparePart) -> AppResult<SparePart> {
        sqlx::query_as::<_, SparePart>(
            r#"
            INSERT INTO spare_parts (id, name, code, quantity, unit_price, arrival_date, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#
        )
        .bind(Uuid::new_v4())
        .bind(part.name)
        .bind(part.code)
        .bind(part.quantity)
        .bind(part.unit_price)
        .bind(part.arrival_date)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_sqlx(e, "creating spare part"))
    }

    async fn update(&self, id: Uuid, changes: SparePartChanges) -> AppResult<SparePart> {
        let current = self.find_by_id(id).await?
            .ok_or_else(|| not_found_error("Spare part", &id.to_string()))?;
        let next = changes.apply(current);

        sqlx::query_as::<_, SparePart>(
            r#"
            UPDATE spare_parts
            SET name = $2, code = $3, quantity = $4, unit_price = $5, arrival_date = $6
            WHERE id = $1
            RETURNING *
            "#
        )
        .bind(id)
        .bind(next.name)
        .bind(next.code)
        .bind(next.quantity)
        .bind(next.unit_price)
        .bind(next.arrival_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_sqlx(e, "updating spare part"))?
        .ok_or_else(|| not_found_error("Spare part", &id.to_string()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM spare_parts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::from_sqlx(e, "deleting spare part"))?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Spare part", &id.to_string()));
        }

        Ok(())
    }

    async fn decrement_stock(&self, code: &str, count: i32) -> AppResult<Option<SparePart>> {
        // Una sola sentencia: dos órdenes concurrentes no pueden dejar stock negativo
        sqlx::query_as::<_, SparePart>(
            r#"
            UPDATE spare_parts
            SET quantity = GREATEST(quantity - $2, 0)
            WHERE code = $1
            RETURNING *
            "#
        )
        .bind(code)
        .bind(count)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_sqlx(e, "adjusting spare part stock"))
    }
}
