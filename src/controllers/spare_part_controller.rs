use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::spare_part_dto::{
    CreateSparePartRequest, SparePartResponse, SparePartSearchQuery, UpdateSparePartRequest,
};
use crate::models::{NewSparePart, SparePartChanges};
use crate::repositories::{Repositories, SparePartRepository};
use crate::services::search_service::filter_spare_parts;
use crate::utils::errors::{duplicate_key_error, not_found_error, AppResult};
use crate::utils::validation::money_from_f64;

pub struct SparePartController {
    repository: Arc<dyn SparePartRepository>,
}

impl SparePartController {
    pub fn new(repositories: &Repositories) -> Self {
        Self {
            repository: repositories.spare_parts.clone(),
        }
    }

    pub async fn create(&self, request: CreateSparePartRequest) -> AppResult<SparePartResponse> {
        let request = request.normalize();
        request.validate()?;

        if self.repository.code_taken(&request.code, None).await? {
            return Err(duplicate_key_error("Spare part", "code", &request.code));
        }

        let part = self
            .repository
            .create(NewSparePart {
                name: request.name,
                code: request.code,
                quantity: request.quantity,
                unit_price: money_from_f64("narxi", request.unit_price)?,
                arrival_date: request.arrival_date.unwrap_or_else(|| Utc::now().date_naive()),
            })
            .await?;

        info!("🔧 Repuesto creado: {} x{} ({})", part.code, part.quantity, part.id);
        Ok(part.into())
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<SparePartResponse> {
        let part = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Spare part", &id.to_string()))?;

        Ok(part.into())
    }

    pub async fn list(&self, query: SparePartSearchQuery) -> AppResult<Vec<SparePartResponse>> {
        let parts = self.repository.list().await?;

        Ok(filter_spare_parts(parts, query.q.as_deref())
            .into_iter()
            .map(Into::into)
            .collect())
    }

    pub async fn update(&self, id: Uuid, request: UpdateSparePartRequest) -> AppResult<SparePartResponse> {
        let request = request.normalize();
        request.validate()?;

        if self.repository.find_by_id(id).await?.is_none() {
            return Err(not_found_error("Spare part", &id.to_string()));
        }

        if let Some(code) = &request.code {
            if self.repository.code_taken(code, Some(id)).await? {
                return Err(duplicate_key_error("Spare part", "code", code));
            }
        }

        let unit_price = request
            .unit_price
            .map(|price| money_from_f64("narxi", price))
            .transpose()?;

        let part = self
            .repository
            .update(
                id,
                SparePartChanges {
                    name: request.name,
                    code: request.code,
                    quantity: request.quantity,
                    unit_price,
                    arrival_date: request.arrival_date,
                },
            )
            .await?;

        info!("✏️ Repuesto actualizado: {} → {} unidades", part.code, part.quantity);
        Ok(part.into())
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.delete(id).await?;
        info!("🗑️ Repuesto eliminado: {}", id);
        Ok(())
    }
}
