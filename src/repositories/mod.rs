//! Capa de acceso a registros
//!
//! Un trait por entidad con implementación PostgreSQL y en memoria.

pub mod memory;
pub mod repair_order_repository;
pub mod spare_part_repository;
pub mod vehicle_repository;

use sqlx::PgPool;
use std::sync::Arc;

pub use repair_order_repository::{PgRepairOrderRepository, RepairOrderRepository};
pub use spare_part_repository::{PgSparePartRepository, SparePartRepository};
pub use vehicle_repository::{PgVehicleRepository, VehicleRepository};

use memory::{InMemoryRepairOrderRepository, InMemorySparePartRepository, InMemoryVehicleRepository};

/// Repositorios compartidos por todos los handlers
#[derive(Clone)]
pub struct Repositories {
    pub vehicles: Arc<dyn VehicleRepository>,
    pub spare_parts: Arc<dyn SparePartRepository>,
    pub repair_orders: Arc<dyn RepairOrderRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            vehicles: Arc::new(PgVehicleRepository::new(pool.clone())),
            spare_parts: Arc::new(PgSparePartRepository::new(pool.clone())),
            repair_orders: Arc::new(PgRepairOrderRepository::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            vehicles: Arc::new(InMemoryVehicleRepository::new()),
            spare_parts: Arc::new(InMemorySparePartRepository::new()),
            repair_orders: Arc::new(InMemoryRepairOrderRepository::new()),
        }
    }
}
