use axum::{
    extract::{rejection::{JsonRejection, PathRejection, QueryRejection}, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::repair_order_controller::RepairOrderController;
use crate::dto::repair_order_dto::{
    CreateRepairOrderRequest, RepairOrderResponse, RepairOrderSearchQuery, UpdateRepairOrderRequest,
};
use crate::dto::DeleteResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_repair_order_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/:id", get(get_order).put(update_order).delete(delete_order))
}

async fn create_order(
    State(state): State<AppState>,
    payload: Result<Json<CreateRepairOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RepairOrderResponse>), AppError> {
    let Json(request) = payload?;
    let controller = RepairOrderController::new(&state.repositories);
    // El ajuste de stock ya quedó registrado en el log; el cliente solo recibe la orden
    let (response, _adjustment) = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_order(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<RepairOrderResponse>, AppError> {
    let Path(id) = id?;
    let controller = RepairOrderController::new(&state.repositories);
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn list_orders(
    State(state): State<AppState>,
    query: Result<Query<RepairOrderSearchQuery>, QueryRejection>,
) -> Result<Json<Vec<RepairOrderResponse>>, AppError> {
    let Query(query) = query?;
    let controller = RepairOrderController::new(&state.repositories);
    let response = controller.list(query).await?;
    Ok(Json(response))
}

async fn update_order(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateRepairOrderRequest>, JsonRejection>,
) -> Result<Json<RepairOrderResponse>, AppError> {
    let Path(id) = id?;
    let Json(request) = payload?;
    let controller = RepairOrderController::new(&state.repositories);
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_order(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<DeleteResponse>, AppError> {
    let Path(id) = id?;
    let controller = RepairOrderController::new(&state.repositories);
    controller.delete(id).await?;
    Ok(Json(DeleteResponse::deleted("Repair order")))
}
