use futures::try_join;

use crate::dto::dashboard_dto::DashboardResponse;
use crate::repositories::Repositories;
use crate::services::dashboard_service::summarize;
use crate::utils::errors::AppResult;

pub struct DashboardController {
    repositories: Repositories,
    low_stock_threshold: i32,
}

impl DashboardController {
    pub fn new(repositories: &Repositories, low_stock_threshold: i32) -> Self {
        Self {
            repositories: repositories.clone(),
            low_stock_threshold,
        }
    }

    /// Cargar los tres listados a la vez y resumirlos
    pub async fn summary(&self) -> AppResult<DashboardResponse> {
        let (vehicles, spare_parts, orders) = try_join!(
            self.repositories.vehicles.list(),
            self.repositories.spare_parts.list(),
            self.repositories.repair_orders.list(),
        )?;

        Ok(summarize(&vehicles, spare_parts, orders, self.low_stock_threshold).into())
    }
}
