//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean al schema
//! PostgreSQL: vehículos, repuestos y órdenes de reparación.

pub mod repair_order;
pub mod spare_part;
pub mod vehicle;

pub use repair_order::{NewRepairOrder, RepairOrder, RepairOrderChanges};
pub use spare_part::{NewSparePart, SparePart, SparePartChanges};
pub use vehicle::{NewVehicle, Vehicle, VehicleChanges};
