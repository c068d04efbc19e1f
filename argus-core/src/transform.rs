use thiserror::Error;

use crate::Metric;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// A required input is missing, empty or malformed. Raised before any
    /// metric is mutated.
    #[error("{0}")]
    InvalidArgument(String),

    /// The transform doesn't support the requested call form.
    #[error("{0}")]
    UnsupportedOperation(String),
}

impl TransformError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        TransformError::InvalidArgument(msg.into())
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        TransformError::UnsupportedOperation(msg.into())
    }

    /// Both kinds are permanent: replaying the same call fails the same way.
    pub fn is_retryable(&self) -> bool {
        false
    }
}

/// A metric transform. Implementations mutate the metrics they are handed and
/// give the same slice back so calls can be chained.
pub trait Transform {
    /// Applies the transform without parameters.
    fn transform<'a>(&self, metrics: &'a mut [Metric])
        -> Result<&'a mut [Metric], TransformError>;

    /// Applies the transform with the given constants.
    fn transform_with_constants<'a>(
        &self,
        metrics: &'a mut [Metric],
        constants: &[String],
    ) -> Result<&'a mut [Metric], TransformError>;

    /// Applies the transform over several metric lists at once.
    fn transform_lists(&self, lists: &mut [Vec<Metric>]) -> Result<Vec<Metric>, TransformError>;

    /// Token used by callers to label the results of this transform.
    fn result_scope_name(&self) -> &'static str;
}
