//! Resumen del dashboard
//!
//! Totales por entidad, últimas órdenes y repuestos con poco stock.

use serde::Serialize;

use crate::models::{RepairOrder, SparePart, Vehicle};

/// Número de órdenes recientes mostradas
pub const RECENT_ORDERS_LIMIT: usize = 3;
/// Número máximo de repuestos con poco stock mostrados
pub const LOW_STOCK_LIMIT: usize = 4;
/// Por debajo de esta cantidad el stock es crítico
pub const CRITICAL_STOCK_BELOW: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StockLevel {
    Critical,
    Low,
}

impl StockLevel {
    pub fn for_quantity(quantity: i32) -> Self {
        if quantity < CRITICAL_STOCK_BELOW {
            StockLevel::Critical
        } else {
            StockLevel::Low
        }
    }
}

#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub total_vehicles: usize,
    pub total_spare_parts: usize,
    pub total_orders: usize,
    pub recent_orders: Vec<RepairOrder>,
    pub low_stock_parts: Vec<(SparePart, StockLevel)>,
}

/// Construir el resumen a partir de los listados (ya ordenados del más reciente al más antiguo)
pub fn summarize(
    vehicles: &[Vehicle],
    spare_parts: Vec<SparePart>,
    orders: Vec<RepairOrder>,
    low_stock_threshold: i32,
) -> DashboardSummary {
    let total_spare_parts = spare_parts.len();
    let total_orders = orders.len();

    let low_stock_parts = spare_parts
        .into_iter()
        .filter(|p| p.quantity < low_stock_threshold)
        .take(LOW_STOCK_LIMIT)
        .map(|p| {
            let level = StockLevel::for_quantity(p.quantity);
            (p, level)
        })
        .collect();

    DashboardSummary {
        total_vehicles: vehicles.len(),
        total_spare_parts,
        total_orders,
        recent_orders: orders.into_iter().take(RECENT_ORDERS_LIMIT).collect(),
        low_stock_parts,
    }
}
