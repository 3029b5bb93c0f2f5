use compound_sim::{
    compare, simulate_detailed, AllocationReport, ComparisonRow, SimError, SimulationConfig,
    SimulationRow,
};
use serde::Serialize;
use strategy::{RunSummary, ThroughputPlan};

use crate::logging::{RunLogEvent, RunLogEventKind, RunLogWriter};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub run_id: u64,
    pub allocation: AllocationReport,
    pub trajectory: Vec<SimulationRow>,
    pub degenerate_from: Option<u32>,
    pub halted_at: Option<u32>,
    pub comparison: Vec<ComparisonRow>,
    pub summary: RunSummary,
    pub throughput: ThroughputPlan,
}

/// Runs one simulation end to end. Holds nothing between runs.
#[derive(Debug, Clone, Copy)]
pub struct SimulationRunner {
    run_id: u64,
}

impl SimulationRunner {
    pub fn new(run_id: u64) -> Self {
        Self { run_id }
    }

    pub fn run(
        &self,
        config: &SimulationConfig,
        log: &mut dyn RunLogWriter,
    ) -> Result<SimulationReport, SimError> {
        log.write(self.event(RunLogEventKind::RunStarted).with_detail(format!(
            "months={} spread_pct={} reinvestment_rate_pct={}",
            config.months, config.spread_pct, config.reinvestment_rate_pct
        )));

        if let Err(err) = config.validate() {
            log.write(
                self.event(RunLogEventKind::RunRejected)
                    .with_detail(err.to_string()),
            );
            return Err(err);
        }
        log.write(self.event(RunLogEventKind::ConfigValidated));

        let allocation = config.allocation_report();
        if !allocation.is_matching {
            log.write(
                self.event(RunLogEventKind::AllocationMismatch)
                    .with_detail(format!(
                        "allocated={:.2} initial={:.2} difference={:.2}",
                        allocation.total_allocated,
                        allocation.initial_capital,
                        allocation.difference
                    )),
            );
        }

        let outcome = simulate_detailed(config)?;
        if let Some(month) = outcome.degenerate_from {
            log.write(
                self.event(RunLogEventKind::DegenerateState)
                    .at_month(month)
                    .with_detail("total capital at or below zero; redistribution skipped"),
            );
        }
        if let Some(month) = outcome.halted_at {
            log.write(
                self.event(RunLogEventKind::TrajectoryHalted)
                    .at_month(month)
                    .with_detail("non-finite figure; returning completed months"),
            );
        }
        log.write(
            self.event(RunLogEventKind::TrajectoryComputed)
                .with_detail(format!("rows={}", outcome.rows.len())),
        );

        let comparison = compare(config)?;
        log.write(
            self.event(RunLogEventKind::ComparisonComputed)
                .with_detail(format!("platforms={}", comparison.len())),
        );

        let summary = RunSummary::from_rows(&outcome.rows, config.initial_capital);
        let throughput = ThroughputPlan::from_config(config);
        log.write(
            self.event(RunLogEventKind::RunCompleted)
                .with_detail(format!("ending_capital={:.2}", summary.ending_capital)),
        );

        Ok(SimulationReport {
            run_id: self.run_id,
            allocation,
            trajectory: outcome.rows,
            degenerate_from: outcome.degenerate_from,
            halted_at: outcome.halted_at,
            comparison,
            summary,
            throughput,
        })
    }

    fn event(&self, kind: RunLogEventKind) -> RunLogEvent {
        RunLogEvent::new(self.run_id, kind)
    }
}
