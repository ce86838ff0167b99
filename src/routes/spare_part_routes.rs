use axum::{
    extract::{rejection::{JsonRejection, PathRejection, QueryRejection}, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::spare_part_controller::SparePartController;
use crate::dto::spare_part_dto::{
    CreateSparePartRequest, SparePartResponse, SparePartSearchQuery, UpdateSparePartRequest,
};
use crate::dto::DeleteResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_spare_part_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_spare_parts).post(create_spare_part))
        .route("/:id", get(get_spare_part).put(update_spare_part).delete(delete_spare_part))
}

async fn create_spare_part(
    State(state): State<AppState>,
    payload: Result<Json<CreateSparePartRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SparePartResponse>), AppError> {
    let Json(request) = payload?;
    let controller = SparePartController::new(&state.repositories);
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_spare_part(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<SparePartResponse>, AppError> {
    let Path(id) = id?;
    let controller = SparePartController::new(&state.repositories);
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn list_spare_parts(
    State(state): State<AppState>,
    query: Result<Query<SparePartSearchQuery>, QueryRejection>,
) -> Result<Json<Vec<SparePartResponse>>, AppError> {
    let Query(query) = query?;
    let controller = SparePartController::new(&state.repositories);
    let response = controller.list(query).await?;
    Ok(Json(response))
}

async fn update_spare_part(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateSparePartRequest>, JsonRejection>,
) -> Result<Json<SparePartResponse>, AppError> {
    let Path(id) = id?;
    let Json(request) = payload?;
    let controller = SparePartController::new(&state.repositories);
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_spare_part(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<DeleteResponse>, AppError> {
    let Path(id) = id?;
    let controller = SparePartController::new(&state.repositories);
    controller.delete(id).await?;
    Ok(Json(DeleteResponse::deleted("Spare part")))
}
