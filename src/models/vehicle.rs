//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y sus variantes para CRUD operations.
//! Mapea exactamente a la tabla `vehicles` de PostgreSQL.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Vehículo registrado en el taller
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub plate_number: String,
    pub created_at: DateTime<Utc>,
}

/// Datos para insertar un vehículo nuevo
#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub plate_number: String,
}

impl NewVehicle {
    pub fn into_record(self, id: Uuid, created_at: DateTime<Utc>) -> Vehicle {
        Vehicle {
            id,
            plate_number: self.plate_number,
            created_at,
        }
    }
}

/// Cambios parciales sobre un vehículo existente
#[derive(Debug, Clone, Default)]
pub struct VehicleChanges {
    pub plate_number: Option<String>,
}

impl VehicleChanges {
    /// Aplicar los cambios sobre el registro actual
    pub fn apply(self, current: Vehicle) -> Vehicle {
        Vehicle {
            plate_number: self.plate_number.unwrap_or(current.plate_number),
            ..current
        }
    }
}
