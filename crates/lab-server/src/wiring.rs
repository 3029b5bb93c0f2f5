use axum::{routing::get, Router};
use compound_sim::SimulationConfig;

pub fn build_app(default_config: SimulationConfig) -> Router {
    api::app_with_default_config(default_config).route("/health", get(healthcheck))
}

async fn healthcheck() -> &'static str {
    "ok"
}
