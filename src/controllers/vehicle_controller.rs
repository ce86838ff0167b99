use std::sync::Arc;

use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::vehicle_dto::{
    CreateVehicleRequest, UpdateVehicleRequest, VehicleResponse, VehicleSearchQuery,
};
use crate::models::{NewVehicle, VehicleChanges};
use crate::repositories::{Repositories, VehicleRepository};
use crate::services::search_service::filter_vehicles;
use crate::utils::errors::{duplicate_key_error, not_found_error, AppResult};

pub struct VehicleController {
    repository: Arc<dyn VehicleRepository>,
}

impl VehicleController {
    pub fn new(repositories: &Repositories) -> Self {
        Self {
            repository: repositories.vehicles.clone(),
        }
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> AppResult<VehicleResponse> {
        let request = request.normalize();
        request.validate()?;

        // Verificar que la matrícula no exista
        if self.repository.plate_taken(&request.plate_number, None).await? {
            return Err(duplicate_key_error("Vehicle", "plate number", &request.plate_number));
        }

        let vehicle = self
            .repository
            .create(NewVehicle {
                plate_number: request.plate_number,
            })
            .await?;

        info!("🚗 Vehículo creado: {} ({})", vehicle.plate_number, vehicle.id);
        Ok(vehicle.into())
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<VehicleResponse> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))?;

        Ok(vehicle.into())
    }

    pub async fn list(&self, query: VehicleSearchQuery) -> AppResult<Vec<VehicleResponse>> {
        let vehicles = self.repository.list().await?;

        Ok(filter_vehicles(vehicles, query.q.as_deref())
            .into_iter()
            .map(Into::into)
            .collect())
    }

    pub async fn update(&self, id: Uuid, request: UpdateVehicleRequest) -> AppResult<VehicleResponse> {
        let request = request.normalize();
        request.validate()?;

        if self.repository.find_by_id(id).await?.is_none() {
            return Err(not_found_error("Vehicle", &id.to_string()));
        }

        // La propia matrícula no cuenta como duplicado
        if let Some(plate) = &request.plate_number {
            if self.repository.plate_taken(plate, Some(id)).await? {
                return Err(duplicate_key_error("Vehicle", "plate number", plate));
            }
        }

        let vehicle = self
            .repository
            .update(
                id,
                VehicleChanges {
                    plate_number: request.plate_number,
                },
            )
            .await?;

        info!("✏️ Vehículo actualizado: {}", vehicle.id);
        Ok(vehicle.into())
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.delete(id).await?;
        info!("🗑️ Vehículo eliminado: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::AppError;

    fn create_request(plate: &str) -> CreateVehicleRequest {
        CreateVehicleRequest {
            plate_number: plate.to_string(),
        }
    }

    fn update_request(plate: &str) -> UpdateVehicleRequest {
        UpdateVehicleRequest {
            plate_number: Some(plate.to_string()),
        }
    }

    #[tokio::test]
    async fn test_duplicate_plate_is_rejected() {
        let controller = VehicleController::new(&Repositories::in_memory());
        controller.create(create_request("01A123BC")).await.unwrap();

        let err = controller.create(create_request(" 01A123BC ")).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateKey(_)));
    }

    #[tokio::test]
    async fn test_created_vehicle_is_listed() {
        let controller = VehicleController::new(&Repositories::in_memory());
        let created = controller.create(create_request("01A123BC")).await.unwrap();

        let listed = controller.list(VehicleSearchQuery::default()).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
        assert_eq!(listed[0].plate_number, "01A123BC");
    }

    #[tokio::test]
    async fn test_blank_plate_is_validation_error() {
        let controller = VehicleController::new(&Repositories::in_memory());
        let err = controller.create(create_request("   ")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_plate_uniqueness() {
        let controller = VehicleController::new(&Repositories::in_memory());
        let first = controller.create(create_request("01A111AA")).await.unwrap();
        let second = controller.create(create_request("01A222AA")).await.unwrap();

        let err = controller.update(second.id, update_request("01A111AA")).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateKey(_)));

        let same = controller.update(first.id, update_request("01A111AA")).await.unwrap();
        assert_eq!(same.plate_number, "01A111AA");
        assert_eq!(same.created_at, first.created_at);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_vehicle() {
        let controller = VehicleController::new(&Repositories::in_memory());

        let err = controller.update(Uuid::new_v4(), update_request("01A111AA")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = controller.delete(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
