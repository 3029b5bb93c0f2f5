#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunLogEventKind {
    RunStarted,
    ConfigValidated,
    RunRejected,
    AllocationMismatch,
    TrajectoryComputed,
    DegenerateState,
    TrajectoryHalted,
    ComparisonComputed,
    RunCompleted,
    ExportWritten,
}

impl RunLogEventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RunStarted => "run_started",
            Self::ConfigValidated => "config_validated",
            Self::RunRejected => "run_rejected",
            Self::AllocationMismatch => "allocation_mismatch",
            Self::TrajectoryComputed => "trajectory_computed",
            Self::DegenerateState => "degenerate_state",
            Self::TrajectoryHalted => "trajectory_halted",
            Self::ComparisonComputed => "comparison_computed",
            Self::RunCompleted => "run_completed",
            Self::ExportWritten => "export_written",
        }
    }

    pub fn is_warning(self) -> bool {
        matches!(
            self,
            Self::RunRejected
                | Self::AllocationMismatch
                | Self::DegenerateState
                | Self::TrajectoryHalted
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunLogEvent {
    pub run_id: u64,
    pub kind: RunLogEventKind,
    pub month: Option<u32>,
    pub detail: Option<String>,
}

impl RunLogEvent {
    pub fn new(run_id: u64, kind: RunLogEventKind) -> Self {
        Self {
            run_id,
            kind,
            month: None,
            detail: None,
        }
    }

    pub fn at_month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

pub trait RunLogWriter {
    fn write(&mut self, event: RunLogEvent);
}

#[derive(Debug, Default)]
pub struct InMemoryRunLogWriter {
    events: Vec<RunLogEvent>,
}

impl InMemoryRunLogWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[RunLogEvent] {
        &self.events
    }

    pub fn kinds(&self) -> Vec<RunLogEventKind> {
        self.events.iter().map(|event| event.kind).collect()
    }
}

impl RunLogWriter for InMemoryRunLogWriter {
    fn write(&mut self, event: RunLogEvent) {
        self.events.push(event);
    }
}

/// Forwards run events to the installed `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingRunLogWriter;

impl RunLogWriter for TracingRunLogWriter {
    fn write(&mut self, event: RunLogEvent) {
        let kind = event.kind.as_str();
        let detail = event.detail.as_deref().unwrap_or("");

        if event.kind.is_warning() {
            tracing::warn!(run_id = event.run_id, month = event.month, detail, "{kind}");
        } else {
            tracing::info!(run_id = event.run_id, month = event.month, detail, "{kind}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::{
        layer::{Context, SubscriberExt},
        Layer,
    };

    use super::{
        InMemoryRunLogWriter, RunLogEvent, RunLogEventKind, RunLogWriter, TracingRunLogWriter,
    };

    #[test]
    fn in_memory_writer_keeps_events_in_order() {
        let mut writer = InMemoryRunLogWriter::new();

        writer.write(RunLogEvent::new(1, RunLogEventKind::RunStarted));
        writer.write(
            RunLogEvent::new(1, RunLogEventKind::DegenerateState)
                .at_month(4)
                .with_detail("total capital reached zero"),
        );

        assert_eq!(
            writer.kinds(),
            vec![RunLogEventKind::RunStarted, RunLogEventKind::DegenerateState]
        );
        assert_eq!(writer.events()[1].month, Some(4));
        assert_eq!(
            writer.events()[1].detail.as_deref(),
            Some("total capital reached zero")
        );
    }

    #[derive(Clone, Default)]
    struct LevelCapture {
        levels: Arc<Mutex<Vec<Level>>>,
    }

    impl<S: Subscriber> Layer<S> for LevelCapture {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            self.levels.lock().unwrap().push(*event.metadata().level());
        }
    }

    #[test]
    fn tracing_writer_warns_on_warning_kinds_only() {
        let capture = LevelCapture::default();
        let subscriber = tracing_subscriber::registry().with(capture.clone());

        tracing::subscriber::with_default(subscriber, || {
            let mut writer = TracingRunLogWriter;
            writer.write(RunLogEvent::new(9, RunLogEventKind::RunStarted));
            writer.write(RunLogEvent::new(9, RunLogEventKind::AllocationMismatch));
            writer.write(
                RunLogEvent::new(9, RunLogEventKind::TrajectoryHalted)
                    .at_month(4)
                    .with_detail("non-finite figure"),
            );
            writer.write(RunLogEvent::new(9, RunLogEventKind::RunCompleted));
        });

        assert_eq!(
            *capture.levels.lock().unwrap(),
            vec![Level::INFO, Level::WARN, Level::WARN, Level::INFO]
        );
    }
}
