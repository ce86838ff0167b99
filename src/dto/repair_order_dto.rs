use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::RepairOrder;
use crate::utils::validation::{money_to_f64, trim_in_place};

// Request para crear una orden de reparación
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRepairOrderRequest {
    #[serde(rename = "moshina_nomeri")]
    #[validate(length(min = 1, max = 32, message = "Plate number is required"))]
    pub plate_number: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[serde(rename = "usta_haqi", default)]
    #[validate(range(min = 0.0, message = "Labor fee cannot be negative"))]
    pub labor_fee: Option<f64>,

    #[serde(rename = "sanasi", default)]
    pub service_date: Option<NaiveDate>,

    #[serde(rename = "zapchast_soni", default)]
    #[validate(range(min = 0, message = "Part count cannot be negative"))]
    pub part_count: i32,

    #[serde(rename = "zapchast_kod", default)]
    pub part_code: Option<String>,
}

impl CreateRepairOrderRequest {
    pub fn normalize(mut self) -> Self {
        trim_in_place(&mut self.plate_number);
        trim_in_place(&mut self.description);
        self
    }
}

/// Distinguir un campo ausente (`None`) de un `null` explícito (`Some(None)`)
fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// Request para actualizar una orden; `zapchast_kod: ""` borra el código
// y `usta_haqi: null` borra el pago del mecánico
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateRepairOrderRequest {
    #[serde(rename = "moshina_nomeri")]
    #[validate(length(min = 1, max = 32, message = "Plate number cannot be empty"))]
    pub plate_number: Option<String>,

    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: Option<String>,

    #[serde(rename = "usta_haqi", default, deserialize_with = "explicit_null")]
    pub labor_fee: Option<Option<f64>>,

    #[serde(rename = "sanasi")]
    pub service_date: Option<NaiveDate>,

    #[serde(rename = "zapchast_soni")]
    #[validate(range(min = 0, message = "Part count cannot be negative"))]
    pub part_count: Option<i32>,

    #[serde(rename = "zapchast_kod")]
    pub part_code: Option<String>,
}

impl UpdateRepairOrderRequest {
    pub fn normalize(mut self) -> Self {
        if let Some(plate) = self.plate_number.as_mut() {
            trim_in_place(plate);
        }
        if let Some(description) = self.description.as_mut() {
            trim_in_place(description);
        }
        self
    }
}

// Filtros de búsqueda: matrícula y código de repuesto (ambos deben coincidir)
#[derive(Debug, Default, Deserialize)]
pub struct RepairOrderSearchQuery {
    pub plate: Option<String>,
    pub part_code: Option<String>,
}

// Response de orden de reparación
#[derive(Debug, Serialize)]
pub struct RepairOrderResponse {
    pub id: Uuid,
    #[serde(rename = "moshina_nomeri")]
    pub plate_number: String,
    pub description: String,
    #[serde(rename = "usta_haqi")]
    pub labor_fee: Option<f64>,
    #[serde(rename = "sanasi")]
    pub service_date: NaiveDate,
    #[serde(rename = "zapchast_soni")]
    pub part_count: i32,
    #[serde(rename = "zapchast_kod")]
    pub part_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<RepairOrder> for RepairOrderResponse {
    fn from(order: RepairOrder) -> Self {
        Self {
            id: order.id,
            plate_number: order.plate_number,
            description: order.description,
            labor_fee: order.labor_fee.map(money_to_f64),
            service_date: order.service_date,
            part_count: order.part_count,
            part_code: order.part_code,
            created_at: order.created_at,
        }
    }
}
