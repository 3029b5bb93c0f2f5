use std::io::{self, Write};

use compound_sim::{ComparisonRow, Platform, SimulationRow};

use crate::logging::{RunLogEvent, RunLogEventKind, RunLogWriter};

pub const COMPARISON_CSV_HEADER: &str =
    "platform,name,fee,transfer_time,daily_limit,monthly_volume,cycles_per_month,monthly_return,yearly_return\n";

pub struct ReportCsvWriter<W: Write> {
    writer: W,
}

impl<W: Write> ReportCsvWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Columns follow the funded buckets of the first row.
    pub fn write_trajectory(&mut self, rows: &[SimulationRow]) -> io::Result<()> {
        let platforms: Vec<Platform> = rows
            .first()
            .map(|row| row.balances.keys().copied().collect())
            .unwrap_or_default();

        self.writer.write_all(trajectory_header(&platforms).as_bytes())?;
        for row in rows {
            write!(self.writer, "{},{:.2},{:.2}", row.month, row.capital, row.profit)?;
            for platform in &platforms {
                let balance = row.balances.get(platform).copied().unwrap_or(0.0);
                write!(self.writer, ",{balance:.2}")?;
            }
            writeln!(
                self.writer,
                ",{:.2},{:.2}",
                row.return_rate_pct, row.accumulated_return_pct
            )?;
        }
        Ok(())
    }

    pub fn write_comparison(&mut self, rows: &[ComparisonRow]) -> io::Result<()> {
        self.writer.write_all(COMPARISON_CSV_HEADER.as_bytes())?;
        for row in rows {
            writeln!(
                self.writer,
                "{},{},{},{},{},{},{:.1},{:.2},{:.2}",
                row.platform.as_key(),
                escape_csv_field(row.platform.display_name()),
                row.fee_pct,
                row.transfer_hours,
                row.daily_limit_usd,
                row.monthly_volume_usd,
                row.cycles_per_month,
                row.monthly_return_pct,
                row.yearly_return_pct
            )?;
        }
        Ok(())
    }

    pub fn write_trajectory_and_log(
        &mut self,
        run_id: u64,
        rows: &[SimulationRow],
        run_log_writer: &mut dyn RunLogWriter,
    ) -> io::Result<()> {
        self.write_trajectory(rows)?;
        self.writer.flush()?;
        run_log_writer.write(
            RunLogEvent::new(run_id, RunLogEventKind::ExportWritten)
                .with_detail(format!("trajectory_rows={}", rows.len())),
        );
        Ok(())
    }
}

pub fn trajectory_header(platforms: &[Platform]) -> String {
    let mut header = String::from("month,capital,profit");
    for platform in platforms {
        header.push(',');
        header.push_str(platform.as_key());
        header.push_str("_capital");
    }
    header.push_str(",return_rate,accumulated_return\n");
    header
}

fn escape_csv_field(value: &str) -> String {
    let needs_quotes = value
        .chars()
        .any(|ch| matches!(ch, ',' | '"' | '\n' | '\r'));
    if !needs_quotes {
        return value.to_string();
    }

    let escaped = value.replace('"', "\"\"");
    format!("\"{escaped}\"")
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, collections::BTreeMap, io, rc::Rc};

    use compound_sim::{compare, simulate, Platform, SimulationConfig, SimulationRow};

    use super::{escape_csv_field, trajectory_header, ReportCsvWriter, COMPARISON_CSV_HEADER};
    use crate::logging::{InMemoryRunLogWriter, RunLogEvent, RunLogEventKind, RunLogWriter};

    struct TrackingWriter {
        bytes: Vec<u8>,
        flush_called: Rc<Cell<bool>>,
        flush_fails: bool,
    }

    impl TrackingWriter {
        fn new(flush_called: Rc<Cell<bool>>, flush_fails: bool) -> Self {
            Self {
                bytes: Vec::new(),
                flush_called,
                flush_fails,
            }
        }
    }

    impl io::Write for TrackingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.bytes.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            self.flush_called.set(true);
            if self.flush_fails {
                return Err(io::Error::other("flush failed"));
            }
            Ok(())
        }
    }

    struct FlushAssertingLogWriter {
        flush_called: Rc<Cell<bool>>,
    }

    impl RunLogWriter for FlushAssertingLogWriter {
        fn write(&mut self, _event: RunLogEvent) {
            assert!(
                self.flush_called.get(),
                "expected writer flush before logging"
            );
        }
    }

    fn sample_row() -> SimulationRow {
        SimulationRow {
            month: 2,
            capital: 4_410.5,
            profit: 205.25,
            balances: BTreeMap::from([
                (Platform::Robinhood, 2_205.25),
                (Platform::CashAppStandard, 2_205.25),
            ]),
            return_rate_pct: 4.88,
            accumulated_return_pct: 10.26,
        }
    }

    #[test]
    fn trajectory_header_lists_funded_buckets() {
        let header = trajectory_header(&[Platform::Robinhood, Platform::CashAppStandard]);

        assert_eq!(
            header,
            "month,capital,profit,robinhood_capital,cashapp_standard_capital,return_rate,accumulated_return\n"
        );
    }

    #[test]
    fn writes_trajectory_rows_with_cent_precision() {
        let mut output = Vec::new();
        let mut writer = ReportCsvWriter::new(&mut output);

        writer.write_trajectory(&[sample_row()]).unwrap();

        let csv = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "2,4410.50,205.25,2205.25,2205.25,4.88,10.26");
    }

    #[test]
    fn writes_one_line_per_simulated_month() {
        let rows = simulate(&SimulationConfig::default()).unwrap();
        let mut writer = ReportCsvWriter::new(Vec::new());

        writer.write_trajectory(&rows).unwrap();

        let csv = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(csv.lines().count(), rows.len() + 1);
        assert!(csv.lines().nth(1).unwrap().starts_with("0,4000.00,0.00,1000.00,1500.00"));
    }

    #[test]
    fn writes_comparison_table() {
        let rows = compare(&SimulationConfig::default()).unwrap();
        let mut writer = ReportCsvWriter::new(Vec::new());

        writer.write_comparison(&rows).unwrap();

        let csv = String::from_utf8(writer.into_inner()).unwrap();
        assert!(csv.starts_with(COMPARISON_CSV_HEADER));
        assert_eq!(csv.lines().count(), 6);
        assert!(csv.contains("\ncashapp_fast,Cashapp Fast,1.7,1,7500,225000,"));
    }

    #[test]
    fn write_trajectory_and_log_flushes_before_emitting_log() {
        let flush_called = Rc::new(Cell::new(false));
        let writer = TrackingWriter::new(Rc::clone(&flush_called), false);
        let mut report_writer = ReportCsvWriter::new(writer);
        let mut log_writer = FlushAssertingLogWriter { flush_called };

        report_writer
            .write_trajectory_and_log(7, &[sample_row()], &mut log_writer)
            .expect("trajectory write should flush and log");
    }

    #[test]
    fn write_trajectory_and_log_propagates_flush_errors() {
        let flush_called = Rc::new(Cell::new(false));
        let writer = TrackingWriter::new(Rc::clone(&flush_called), true);
        let mut report_writer = ReportCsvWriter::new(writer);
        let mut log_writer = InMemoryRunLogWriter::new();

        let err = report_writer
            .write_trajectory_and_log(3, &[sample_row()], &mut log_writer)
            .expect_err("flush failure should be returned");

        assert_eq!(err.kind(), io::ErrorKind::Other);
        assert_eq!(log_writer.events().len(), 0);
    }

    #[test]
    fn write_trajectory_and_log_uses_run_id_from_caller() {
        let mut report_writer = ReportCsvWriter::new(Vec::new());
        let mut log_writer = InMemoryRunLogWriter::new();

        report_writer
            .write_trajectory_and_log(42, &[sample_row()], &mut log_writer)
            .unwrap();

        assert_eq!(log_writer.events().len(), 1);
        assert_eq!(log_writer.events()[0].run_id, 42);
        assert_eq!(log_writer.events()[0].kind, RunLogEventKind::ExportWritten);
    }

    #[test]
    fn escapes_fields_with_csv_rules() {
        assert_eq!(escape_csv_field("Kraken"), "Kraken");
        assert_eq!(escape_csv_field("a,\"b\"\nc"), "\"a,\"\"b\"\"\nc\"");
    }
}
