use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::SparePart;
use crate::utils::validation::{money_to_f64, trim_in_place};

// Request para crear un repuesto
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSparePartRequest {
    #[serde(rename = "nomi")]
    #[validate(length(min = 1, max = 200, message = "Spare part name is required"))]
    pub name: String,

    #[serde(rename = "kod")]
    #[validate(length(min = 1, max = 64, message = "Spare part code is required"))]
    pub code: String,

    #[serde(rename = "soni", default)]
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: i32,

    #[serde(rename = "narxi", default)]
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub unit_price: f64,

    #[serde(rename = "kelgan_sanasi", default)]
    pub arrival_date: Option<NaiveDate>,
}

impl CreateSparePartRequest {
    pub fn normalize(mut self) -> Self {
        trim_in_place(&mut self.name);
        trim_in_place(&mut self.code);
        self
    }
}

// Request para actualizar un repuesto
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateSparePartRequest {
    #[serde(rename = "nomi")]
    #[validate(length(min = 1, max = 200, message = "Spare part name cannot be empty"))]
    pub name: Option<String>,

    #[serde(rename = "kod")]
    #[validate(length(min = 1, max = 64, message = "Spare part code cannot be empty"))]
    pub code: Option<String>,

    #[serde(rename = "soni")]
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: Option<i32>,

    #[serde(rename = "narxi")]
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub unit_price: Option<f64>,

    #[serde(rename = "kelgan_sanasi")]
    pub arrival_date: Option<NaiveDate>,
}

impl UpdateSparePartRequest {
    pub fn normalize(mut self) -> Self {
        if let Some(name) = self.name.as_mut() {
            trim_in_place(name);
        }
        if let Some(code) = self.code.as_mut() {
            trim_in_place(code);
        }
        self
    }
}

// Filtro de búsqueda por nombre o código
#[derive(Debug, Default, Deserialize)]
pub struct SparePartSearchQuery {
    pub q: Option<String>,
}

// Response de repuesto
#[derive(Debug, Serialize)]
pub struct SparePartResponse {
    pub id: Uuid,
    #[serde(rename = "nomi")]
    pub name: String,
    #[serde(rename = "kod")]
    pub code: String,
    #[serde(rename = "soni")]
    pub quantity: i32,
    #[serde(rename = "narxi")]
    pub unit_price: f64,
    #[serde(rename = "kelgan_sanasi")]
    pub arrival_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl From<SparePart> for SparePartResponse {
    fn from(part: SparePart) -> Self {
        Self {
            id: part.id,
            name: part.name,
            code: part.code,
            quantity: part.quantity,
            unit_price: money_to_f64(part.unit_price),
            arrival_date: part.arrival_date,
            created_at: part.created_at,
        }
    }
}
