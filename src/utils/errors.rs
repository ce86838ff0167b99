//! Sistema de manejo de errores
//!
//! Este módulo define los errores del sistema y su conversión a
//! respuestas HTTP apropiadas.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Nombres de las restricciones UNIQUE creadas en el esquema
pub const VEHICLE_PLATE_CONSTRAINT: &str = "vehicles_plate_number_key";
pub const SPARE_PART_CODE_CONSTRAINT: &str = "spare_parts_code_key";

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Traducir un error de sqlx añadiendo el contexto de la operación.
    ///
    /// Las violaciones de UNIQUE se convierten en `DuplicateKey`, `RowNotFound`
    /// en `NotFound` y cualquier otro fallo en `StoreUnavailable`.
    pub fn from_sqlx(err: sqlx::Error, context: &str) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::NotFound(format!("Record not found while {}", context)),
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                let message = match db_err.constraint() {
                    Some(VEHICLE_PLATE_CONSTRAINT) => "Plate number is already registered".to_string(),
                    Some(SPARE_PART_CODE_CONSTRAINT) => "Spare part code is already registered".to_string(),
                    _ => format!("Duplicate value while {}", context),
                };
                AppError::DuplicateKey(message)
            }
            _ => AppError::StoreUnavailable(format!("Error {}: {}", context, err)),
        }
    }

    /// Código estable enviado al cliente
    pub fn code(&self) -> &'static str {
        match self {
            AppError::DuplicateKey(_) => "DUPLICATE_KEY",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
        }
    }
}

// Los rechazos de los extractores de axum también responden con el objeto de error JSON
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    code: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code().to_string();
        let (status, error, message, details) = match self {
            AppError::DuplicateKey(msg) => {
                warn!("⚠️ Duplicate key: {}", msg);
                (StatusCode::CONFLICT, "Duplicate Key", msg, None)
            }

            AppError::NotFound(msg) => {
                warn!("🔍 Resource not found: {}", msg);
                (StatusCode::NOT_FOUND, "Not Found", msg, None)
            }

            AppError::StoreUnavailable(msg) => {
                error!("❌ Store unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Store Unavailable",
                    "The data store could not complete the request".to_string(),
                    None,
                )
            }

            AppError::Validation(e) => {
                warn!("⚠️ Validation error: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    "Validation Error",
                    "The provided data is invalid".to_string(),
                    Some(json!(e)),
                )
            }

            AppError::BadRequest(msg) => {
                warn!("⚠️ Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, "Bad Request", msg, None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            message,
            details,
            code,
        };

        (status, Json(body)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Función helper para crear errores de clave duplicada
pub fn duplicate_key_error(resource: &str, field: &str, value: &str) -> AppError {
    AppError::DuplicateKey(format!("{} with {} '{}' already exists", resource, field, value))
}
