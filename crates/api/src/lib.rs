pub mod routes;
pub mod state;

use axum::Router;
use compound_sim::SimulationConfig;

pub fn app() -> Router {
    routes::router(state::AppState::new())
}

pub fn app_with_default_config(default_config: SimulationConfig) -> Router {
    routes::router(state::AppState::with_default_config(default_config))
}
