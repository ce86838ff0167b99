use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::repair_order_dto::{
    CreateRepairOrderRequest, RepairOrderResponse, RepairOrderSearchQuery, UpdateRepairOrderRequest,
};
use crate::models::{NewRepairOrder, RepairOrderChanges};
use crate::repositories::{RepairOrderRepository, Repositories, SparePartRepository};
use crate::services::inventory_service::{apply_part_consumption, StockAdjustment};
use crate::services::search_service::filter_repair_orders;
use crate::utils::errors::{not_found_error, AppResult};
use crate::utils::validation::{money_from_f64, non_empty};

pub struct RepairOrderController {
    repository: Arc<dyn RepairOrderRepository>,
    spare_parts: Arc<dyn SparePartRepository>,
}

impl RepairOrderController {
    pub fn new(repositories: &Repositories) -> Self {
        Self {
            repository: repositories.repair_orders.clone(),
            spare_parts: repositories.spare_parts.clone(),
        }
    }

    /// Crear la orden y, después, descontar el stock del repuesto consumido.
    ///
    /// El resultado del ajuste se devuelve aparte; no afecta al éxito de la orden.
    pub async fn create(
        &self,
        request: CreateRepairOrderRequest,
    ) -> AppResult<(RepairOrderResponse, StockAdjustment)> {
        let request = request.normalize();
        request.validate()?;

        let labor_fee = request
            .labor_fee
            .map(|fee| money_from_f64("usta_haqi", fee))
            .transpose()?;

        let order = self
            .repository
            .create(NewRepairOrder {
                plate_number: request.plate_number,
                description: request.description,
                labor_fee,
                service_date: request.service_date.unwrap_or_else(|| Utc::now().date_naive()),
                part_count: request.part_count,
                part_code: non_empty(request.part_code),
            })
            .await?;

        info!("🛠️ Orden creada: {} para {}", order.id, order.plate_number);

        let adjustment = apply_part_consumption(self.spare_parts.as_ref(), &order).await;
        Ok((order.into(), adjustment))
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<RepairOrderResponse> {
        let order = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Repair order", &id.to_string()))?;

        Ok(order.into())
    }

    pub async fn list(&self, query: RepairOrderSearchQuery) -> AppResult<Vec<RepairOrderResponse>> {
        let orders = self.repository.list().await?;

        Ok(filter_repair_orders(orders, query.plate.as_deref(), query.part_code.as_deref())
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Editar una orden no recalcula ni repone stock
    pub async fn update(&self, id: Uuid, request: UpdateRepairOrderRequest) -> AppResult<RepairOrderResponse> {
        let request = request.normalize();
        request.validate()?;

        let labor_fee = request
            .labor_fee
            .map(|fee| fee.map(|fee| money_from_f64("usta_haqi", fee)).transpose())
            .transpose()?;

        let order = self
            .repository
            .update(
                id,
                RepairOrderChanges {
                    plate_number: request.plate_number,
                    description: request.description,
                    labor_fee,
                    service_date: request.service_date,
                    part_count: request.part_count,
                    part_code: request.part_code.map(|code| non_empty(Some(code))),
                },
            )
            .await?;

        info!("✏️ Orden actualizada: {}", order.id);
        Ok(order.into())
    }

    /// Borrar una orden no repone stock
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.delete(id).await?;
        info!("🗑️ Orden eliminada: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewSparePart;
    use crate::utils::errors::AppError;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    async fn setup(code: &str, quantity: i32) -> (Repositories, RepairOrderController) {
        let repositories = Repositories::in_memory();
        repositories
            .spare_parts
            .create(NewSparePart {
                name: "Moy filtri".to_string(),
                code: code.to_string(),
                quantity,
                unit_price: Decimal::new(1500, 2),
                arrival_date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            })
            .await
            .unwrap();

        let controller = RepairOrderController::new(&repositories);
        (repositories, controller)
    }

    fn order_request(part_code: Option<&str>, part_count: i32) -> CreateRepairOrderRequest {
        CreateRepairOrderRequest {
            plate_number: "01A123BC".to_string(),
            description: "Moy va filtr almashtirish".to_string(),
            labor_fee: Some(100.0),
            service_date: None,
            part_count,
            part_code: part_code.map(str::to_string),
        }
    }

    async fn quantity(repositories: &Repositories, code: &str) -> i32 {
        let parts = repositories.spare_parts.list().await.unwrap();
        parts.iter().find(|p| p.code == code).unwrap().quantity
    }

    #[tokio::test]
    async fn test_order_consumes_stock() {
        let (repositories, controller) = setup("1234", 10).await;

        let (order, adjustment) = controller.create(order_request(Some("1234"), 3)).await.unwrap();
        assert_eq!(order.part_code.as_deref(), Some("1234"));
        assert!(matches!(adjustment, StockAdjustment::Applied { remaining: 7, .. }));
        assert_eq!(quantity(&repositories, "1234").await, 7);

        controller.create(order_request(Some("1234"), 20)).await.unwrap();
        assert_eq!(quantity(&repositories, "1234").await, 0);
    }

    #[tokio::test]
    async fn test_unknown_part_code_still_creates_order() {
        let (repositories, controller) = setup("1234", 10).await;

        let (order, adjustment) = controller.create(order_request(Some("NOPE"), 3)).await.unwrap();
        assert_eq!(adjustment, StockAdjustment::PartNotFound);
        assert_eq!(quantity(&repositories, "1234").await, 10);
        assert_eq!(controller.get_by_id(order.id).await.unwrap().id, order.id);
    }

    #[tokio::test]
    async fn test_empty_part_code_is_stored_as_absent() {
        let (_repositories, controller) = setup("1234", 10).await;

        let (order, adjustment) = controller.create(order_request(Some("  "), 3)).await.unwrap();
        assert_eq!(order.part_code, None);
        assert_eq!(adjustment, StockAdjustment::NotRequested);
        assert_eq!(order.service_date, Utc::now().date_naive());
    }

    #[tokio::test]
    async fn test_edit_and_delete_do_not_restore_stock() {
        let (repositories, controller) = setup("1234", 10).await;
        let (order, _) = controller.create(order_request(Some("1234"), 4)).await.unwrap();

        let request = UpdateRepairOrderRequest {
            part_count: Some(1),
            ..Default::default()
        };
        let updated = controller.update(order.id, request).await.unwrap();
        assert_eq!(updated.part_count, 1);
        assert_eq!(quantity(&repositories, "1234").await, 6);

        controller.delete(order.id).await.unwrap();
        assert_eq!(quantity(&repositories, "1234").await, 6);

        let err = controller.delete(order.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_can_clear_labor_fee() {
        let (_repositories, controller) = setup("1234", 10).await;
        let (order, _) = controller.create(order_request(None, 0)).await.unwrap();
        assert_eq!(order.labor_fee, Some(100.0));

        let request = UpdateRepairOrderRequest {
            labor_fee: Some(None),
            ..Default::default()
        };
        let updated = controller.update(order.id, request).await.unwrap();
        assert_eq!(updated.labor_fee, None);
        assert_eq!(updated.description, order.description);

        let request = UpdateRepairOrderRequest {
            labor_fee: Some(Some(-5.0)),
            ..Default::default()
        };
        let err = controller.update(order.id, request).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_missing_description_is_rejected() {
        let (_repositories, controller) = setup("1234", 10).await;
        let mut request = order_request(None, 0);
        request.description = "   ".to_string();

        let err = controller.create(request).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(controller.list(RepairOrderSearchQuery::default()).await.unwrap().is_empty());
    }
}
