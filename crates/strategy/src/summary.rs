use compound_sim::SimulationRow;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunSummary {
    pub ending_capital: f64,
    pub total_profit: f64,
    pub return_rate_pct: f64,
}

impl RunSummary {
    pub fn from_rows(rows: &[SimulationRow], initial_capital: f64) -> Self {
        let ending_capital = rows
            .last()
            .map(|row| row.capital)
            .unwrap_or(initial_capital);
        let return_rate_pct = rows
            .last()
            .map(|row| row.accumulated_return_pct)
            .unwrap_or(0.0);

        Self {
            ending_capital,
            total_profit: ending_capital - initial_capital,
            return_rate_pct,
        }
    }
}
