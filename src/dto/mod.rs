//! Objetos de transferencia de la API
//!
//! Los nombres de campo JSON son los que usa el frontend del dashboard
//! (`moshina_nomeri`, `kod`, `zapchast_soni`...).

pub mod dashboard_dto;
pub mod repair_order_dto;
pub mod spare_part_dto;
pub mod vehicle_dto;

use serde::Serialize;

// Response de borrado
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

impl DeleteResponse {
    pub fn deleted(resource: &str) -> Self {
        Self {
            success: true,
            message: format!("{} deleted", resource),
        }
    }
}
