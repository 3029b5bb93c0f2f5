pub mod schedule;
pub mod summary;
pub mod throughput;

pub use schedule::{operating_schedule, ScheduleBlock};
pub use summary::RunSummary;
pub use throughput::{BucketThroughput, ThroughputPlan, ThroughputRole};
