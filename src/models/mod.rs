pub mod metrics;
pub mod workout;

pub use metrics::{DateRange, FormLabel, LoadMetric, LoadResult, MetricResult};
pub use workout::{RawWorkout, WorkoutRecord, WorkoutType};
