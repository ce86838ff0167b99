use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::Vehicle;
use crate::utils::validation::trim_in_place;

// Request para crear un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[serde(rename = "moshina_nomeri")]
    #[validate(length(min = 1, max = 32, message = "Plate number is required"))]
    pub plate_number: String,
}

impl CreateVehicleRequest {
    pub fn normalize(mut self) -> Self {
        trim_in_place(&mut self.plate_number);
        self
    }
}

// Request para actualizar un vehículo
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[serde(rename = "moshina_nomeri")]
    #[validate(length(min = 1, max = 32, message = "Plate number cannot be empty"))]
    pub plate_number: Option<String>,
}

impl UpdateVehicleRequest {
    pub fn normalize(mut self) -> Self {
        if let Some(plate) = self.plate_number.as_mut() {
            trim_in_place(plate);
        }
        self
    }
}

// Filtro de búsqueda por matrícula
#[derive(Debug, Default, Deserialize)]
pub struct VehicleSearchQuery {
    pub q: Option<String>,
}

// Response de vehículo
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    #[serde(rename = "moshina_nomeri")]
    pub plate_number: String,
    pub created_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            plate_number: vehicle.plate_number,
            created_at: vehicle.created_at,
        }
    }
}
