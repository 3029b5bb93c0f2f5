pub mod engine;
pub mod export;
pub mod logging;

pub use engine::{SimulationReport, SimulationRunner};

#[cfg(test)]
mod tests {
    use compound_sim::SimulationConfig;

    use crate::{
        export::ReportCsvWriter,
        logging::{InMemoryRunLogWriter, RunLogEventKind},
        SimulationRunner,
    };

    #[test]
    fn report_exports_trajectory_after_run() {
        let mut log = InMemoryRunLogWriter::new();
        let report = SimulationRunner::new(11)
            .run(&SimulationConfig::default(), &mut log)
            .unwrap();

        let mut writer = ReportCsvWriter::new(Vec::new());
        writer
            .write_trajectory_and_log(report.run_id, &report.trajectory, &mut log)
            .unwrap();

        assert_eq!(
            log.kinds().last().copied(),
            Some(RunLogEventKind::ExportWritten)
        );
        let csv = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(csv.lines().count(), report.trajectory.len() + 1);
    }

    #[test]
    fn report_serializes_with_platform_keys() {
        let mut log = InMemoryRunLogWriter::new();
        let report = SimulationRunner::new(1)
            .run(&SimulationConfig::default(), &mut log)
            .unwrap();

        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["run_id"], 1);
        assert_eq!(json["trajectory"][0]["balances"]["cashapp_standard"], 500.0);
        assert_eq!(json["comparison"][3]["platform"], "cashapp_fast");
        assert_eq!(json["throughput"]["buckets"][1]["role"], "rolling_hold");
    }
}
