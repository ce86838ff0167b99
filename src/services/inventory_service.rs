//! Ajuste de inventario
//!
//! Al crear una orden de reparación que consume repuestos, se descuenta
//! el stock del repuesto con ese código. Es un efecto secundario de mejor
//! esfuerzo: la orden ya está creada y su éxito no depende del ajuste.
//! Editar o borrar una orden nunca repone stock.

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::RepairOrder;
use crate::repositories::SparePartRepository;

/// Resultado del ajuste de stock para una orden
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StockAdjustment {
    /// La orden no indica código de repuesto o la cantidad es cero
    NotRequested,
    /// Stock descontado; `remaining` es la cantidad resultante
    Applied { part_id: Uuid, remaining: i32 },
    /// Ningún repuesto tiene ese código; se ignora sin error
    PartNotFound,
    /// El almacén falló; la orden sigue siendo válida
    Failed,
}

/// Aplicar el consumo de repuestos de una orden recién creada
pub async fn apply_part_consumption(
    spare_parts: &dyn SparePartRepository,
    order: &RepairOrder,
) -> StockAdjustment {
    let Some((code, count)) = order.consumed_part() else {
        return StockAdjustment::NotRequested;
    };

    match spare_parts.decrement_stock(code, count).await {
        Ok(Some(part)) => {
            info!(
                "📦 Stock ajustado: repuesto {} -{} → {} (orden {})",
                part.code, count, part.quantity, order.id
            );
            StockAdjustment::Applied {
                part_id: part.id,
                remaining: part.quantity,
            }
        }
        Ok(None) => {
            debug!("Código de repuesto '{}' no existe, ajuste omitido (orden {})", code, order.id);
            StockAdjustment::PartNotFound
        }
        Err(e) => {
            warn!("⚠️ No se pudo ajustar el stock de '{}' para la orden {}: {}", code, order.id, e);
            StockAdjustment::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewRepairOrder, NewSparePart, SparePartChanges};
    use crate::repositories::memory::InMemorySparePartRepository;
    use crate::utils::errors::{AppError, AppResult};
    use async_trait::async_trait;
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;

    fn order(part_code: Option<&str>, part_count: i32) -> RepairOrder {
        NewRepairOrder {
            plate_number: "01A123BC".to_string(),
            description: "Moy almashtirish".to_string(),
            labor_fee: Some(Decimal::new(5000, 2)),
            service_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            part_count,
            part_code: part_code.map(str::to_string),
        }
        .into_record(Uuid::new_v4(), Utc::now())
    }

    async fn repo_with_part(code: &str, quantity: i32) -> InMemorySparePartRepository {
        let repo = InMemorySparePartRepository::new();
        repo.create(NewSparePart {
            name: "Moy filtri".to_string(),
            code: code.to_string(),
            quantity,
            unit_price: Decimal::new(1200, 2),
            arrival_date: NaiveDate::from_ymd_opt(2024, 5, 20).unwrap(),
        })
        .await
        .unwrap();
        repo
    }

    async fn quantity_of(repo: &InMemorySparePartRepository, code: &str) -> i32 {
        let parts = repo.list().await.unwrap();
        parts.iter().find(|p| p.code == code).unwrap().quantity
    }

    #[tokio::test]
    async fn test_consumption_decrements_stock() {
        let repo = repo_with_part("1234", 10).await;

        let outcome = apply_part_consumption(&repo, &order(Some("1234"), 3)).await;
        assert!(matches!(outcome, StockAdjustment::Applied { remaining: 7, .. }));

        let outcome = apply_part_consumption(&repo, &order(Some("1234"), 20)).await;
        assert!(matches!(outcome, StockAdjustment::Applied { remaining: 0, .. }));
        assert_eq!(quantity_of(&repo, "1234").await, 0);
    }

    #[tokio::test]
    async fn test_unknown_code_is_silent_noop() {
        let repo = repo_with_part("1234", 10).await;

        let outcome = apply_part_consumption(&repo, &order(Some("9999"), 3)).await;
        assert_eq!(outcome, StockAdjustment::PartNotFound);
        assert_eq!(quantity_of(&repo, "1234").await, 10);
    }

    #[tokio::test]
    async fn test_nothing_requested() {
        let repo = repo_with_part("1234", 10).await;

        assert_eq!(apply_part_consumption(&repo, &order(None, 3)).await, StockAdjustment::NotRequested);
        assert_eq!(
            apply_part_consumption(&repo, &order(Some("1234"), 0)).await,
            StockAdjustment::NotRequested
        );
        assert_eq!(quantity_of(&repo, "1234").await, 10);
    }

    struct UnavailableStore;

    #[async_trait]
    impl SparePartRepository for UnavailableStore {
        async fn list(&self) -> AppResult<Vec<crate::models::SparePart>> {
            Err(AppError::StoreUnavailable("down".into()))
        }
        async fn find_by_id(&self, _id: Uuid) -> AppResult<Option<crate::models::SparePart>> {
            Err(AppError::StoreUnavailable("down".into()))
        }
        async fn code_taken(&self, _code: &str, _exclude: Option<Uuid>) -> AppResult<bool> {
            Err(AppError::StoreUnavailable("down".into()))
        }
        async fn create(&self, _part: NewSparePart) -> AppResult<crate::models::SparePart> {
            Err(AppError::StoreUnavailable("down".into()))
        }
        async fn update(&self, _id: Uuid, _changes: SparePartChanges) -> AppResult<crate::models::SparePart> {
            Err(AppError::StoreUnavailable("down".into()))
        }
        async fn delete(&self, _id: Uuid) -> AppResult<()> {
            Err(AppError::StoreUnavailable("down".into()))
        }
        async fn decrement_stock(&self, _code: &str, _count: i32) -> AppResult<Option<crate::models::SparePart>> {
            Err(AppError::StoreUnavailable("down".into()))
        }
    }

    #[tokio::test]
    async fn test_store_failure_is_swallowed() {
        let outcome = apply_part_consumption(&UnavailableStore, &order(Some("1234"), 1)).await;
        assert_eq!(outcome, StockAdjustment::Failed);
    }
}
