use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use compound_sim::{Platform, SimError, SimulationConfig, SimulationOverrides};
use runtime::{
    export::ReportCsvWriter, logging::TracingRunLogWriter, SimulationReport, SimulationRunner,
};
use serde::Serialize;
use strategy::{operating_schedule, ScheduleBlock};
use thiserror::Error;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use crate::state::{AppState, StartRunError};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/platforms", get(list_platforms))
        .route("/simulations", post(run_simulation))
        .route("/simulations/default", get(run_default_simulation))
        .route("/simulations/csv", post(export_simulation_csv))
        .route("/simulations/comparison/csv", post(export_comparison_csv))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct PlatformEntry {
    key: Platform,
    name: &'static str,
    fee_pct: f64,
    transfer_hours: f64,
    daily_limit_usd: f64,
    monthly_volume_usd: f64,
}

#[derive(Debug, Serialize)]
struct PlatformsResponse {
    platforms: Vec<PlatformEntry>,
}

#[derive(Debug, Serialize)]
struct SimulationResponse {
    generated_at: String,
    #[serde(flatten)]
    report: SimulationReport,
    schedule: [ScheduleBlock; 2],
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Error)]
enum ApiError {
    #[error(transparent)]
    Simulation(#[from] SimError),
    #[error("run id space exhausted")]
    RunIdOverflow,
    #[error("failed to format timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
    #[error("failed to write csv: {0}")]
    Csv(#[from] std::io::Error),
    #[error("csv output was not utf-8")]
    CsvEncoding(#[from] std::string::FromUtf8Error),
}

impl From<StartRunError> for ApiError {
    fn from(err: StartRunError) -> Self {
        match err {
            StartRunError::RunIdOverflow => Self::RunIdOverflow,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Simulation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::RunIdOverflow | Self::Timestamp(_) | Self::Csv(_) | Self::CsvEncoding(_) => {
                tracing::error!(error = %self, "simulation request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

async fn list_platforms(State(state): State<AppState>) -> Json<PlatformsResponse> {
    let platforms = state
        .default_config()
        .platforms
        .iter()
        .map(|(platform, spec)| PlatformEntry {
            key: platform,
            name: platform.display_name(),
            fee_pct: spec.fee_pct,
            transfer_hours: spec.transfer_hours,
            daily_limit_usd: spec.daily_limit_usd,
            monthly_volume_usd: spec.monthly_volume_usd(),
        })
        .collect();

    Json(PlatformsResponse { platforms })
}

async fn run_simulation(
    State(state): State<AppState>,
    Json(overrides): Json<SimulationOverrides>,
) -> Result<(StatusCode, Json<SimulationResponse>), ApiError> {
    let config = overrides.apply_to(state.default_config());
    let response = simulate_response(&state, &config)?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn run_default_simulation(
    State(state): State<AppState>,
) -> Result<Json<SimulationResponse>, ApiError> {
    simulate_response(&state, state.default_config()).map(Json)
}

async fn export_simulation_csv(
    State(state): State<AppState>,
    Json(overrides): Json<SimulationOverrides>,
) -> Result<impl IntoResponse, ApiError> {
    let report = run_report(&state, &overrides.apply_to(state.default_config()))?;

    let mut writer = ReportCsvWriter::new(Vec::new());
    writer.write_trajectory_and_log(report.run_id, &report.trajectory, &mut TracingRunLogWriter)?;
    csv_response(writer.into_inner())
}

async fn export_comparison_csv(
    State(state): State<AppState>,
    Json(overrides): Json<SimulationOverrides>,
) -> Result<impl IntoResponse, ApiError> {
    let report = run_report(&state, &overrides.apply_to(state.default_config()))?;

    let mut writer = ReportCsvWriter::new(Vec::new());
    writer.write_comparison(&report.comparison)?;
    csv_response(writer.into_inner())
}

fn csv_response(bytes: Vec<u8>) -> Result<impl IntoResponse, ApiError> {
    let csv = String::from_utf8(bytes)?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
        csv,
    ))
}

fn simulate_response(
    state: &AppState,
    config: &SimulationConfig,
) -> Result<SimulationResponse, ApiError> {
    let report = run_report(state, config)?;
    let generated_at = OffsetDateTime::now_utc().format(&Rfc3339)?;

    Ok(SimulationResponse {
        generated_at,
        report,
        schedule: operating_schedule(),
    })
}

fn run_report(state: &AppState, config: &SimulationConfig) -> Result<SimulationReport, ApiError> {
    let run_id = state.start_run()?;
    let report = SimulationRunner::new(run_id).run(config, &mut TracingRunLogWriter)?;
    Ok(report)
}
