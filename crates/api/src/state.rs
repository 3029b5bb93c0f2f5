use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use compound_sim::SimulationConfig;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StartRunError {
    RunIdOverflow,
}

/// Shared across requests. Runs are numbered for log correlation only; no
/// results are retained.
#[derive(Clone, Debug)]
pub struct AppState {
    next_run_id: Arc<AtomicU64>,
    default_config: Arc<SimulationConfig>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_default_config(SimulationConfig::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_config(default_config: SimulationConfig) -> Self {
        Self {
            next_run_id: Arc::new(AtomicU64::new(0)),
            default_config: Arc::new(default_config),
        }
    }

    pub fn default_config(&self) -> &SimulationConfig {
        &self.default_config
    }

    pub fn start_run(&self) -> Result<u64, StartRunError> {
        let previous = self
            .next_run_id
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |current| {
                current.checked_add(1)
            })
            .map_err(|_| StartRunError::RunIdOverflow)?;

        Ok(previous + 1)
    }
}
