//! Controladores
//!
//! Validan las peticiones y coordinan repositorios y servicios.

pub mod dashboard_controller;
pub mod repair_order_controller;
pub mod spare_part_controller;
pub mod vehicle_controller;
