pub mod config;
mod metric;
mod transform;

pub use metric::{Metric, MetricError, ReservedField};
pub use transform::{Transform, TransformError};
