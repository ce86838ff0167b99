//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use crate::config::environment::EnvironmentConfig;
use crate::repositories::Repositories;

#[derive(Clone)]
pub struct AppState {
    pub repositories: Repositories,
    pub config: EnvironmentConfig,
}

impl AppState {
    pub fn new(repositories: Repositories, config: EnvironmentConfig) -> Self {
        Self { repositories, config }
    }

    /// Estado con almacén en memoria, usado por los tests
    pub fn in_memory() -> Self {
        Self::new(Repositories::in_memory(), EnvironmentConfig::for_testing())
    }
}
