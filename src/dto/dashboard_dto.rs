use serde::Serialize;
use uuid::Uuid;

use crate::dto::repair_order_dto::RepairOrderResponse;
use crate::models::SparePart;
use crate::services::dashboard_service::{DashboardSummary, StockLevel};

// Repuesto con poco stock
#[derive(Debug, Serialize)]
pub struct LowStockPartResponse {
    pub id: Uuid,
    pub nomi: String,
    pub kod: String,
    pub soni: i32,
    pub level: StockLevel,
}

impl From<(SparePart, StockLevel)> for LowStockPartResponse {
    fn from((part, level): (SparePart, StockLevel)) -> Self {
        Self {
            id: part.id,
            nomi: part.name,
            kod: part.code,
            soni: part.quantity,
            level,
        }
    }
}

// Response del dashboard
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub total_vehicles: usize,
    pub total_spare_parts: usize,
    pub total_orders: usize,
    pub recent_orders: Vec<RepairOrderResponse>,
    pub low_stock_parts: Vec<LowStockPartResponse>,
}

impl From<DashboardSummary> for DashboardResponse {
    fn from(summary: DashboardSummary) -> Self {
        Self {
            total_vehicles: summary.total_vehicles,
            total_spare_parts: summary.total_spare_parts,
            total_orders: summary.total_orders,
            recent_orders: summary.recent_orders.into_iter().map(Into::into).collect(),
            low_stock_parts: summary.low_stock_parts.into_iter().map(Into::into).collect(),
        }
    }
}
