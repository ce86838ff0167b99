//! Servicios de negocio
//!
//! Ajuste de inventario, filtros de búsqueda y resumen del dashboard.

pub mod dashboard_service;
pub mod inventory_service;
pub mod search_service;

pub use inventory_service::{apply_part_consumption, StockAdjustment};
