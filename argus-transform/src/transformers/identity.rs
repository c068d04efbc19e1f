use argus_core::{Metric, Transform, TransformError};

use crate::Function;

/// Hands the metrics back untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct Identity;

impl Transform for Identity {
    fn transform<'a>(
        &self,
        metrics: &'a mut [Metric],
    ) -> Result<&'a mut [Metric], TransformError> {
        Ok(metrics)
    }

    fn transform_with_constants<'a>(
        &self,
        _metrics: &'a mut [Metric],
        _constants: &[String],
    ) -> Result<&'a mut [Metric], TransformError> {
        Err(TransformError::unsupported(
            "Identity transform is not supposed to be used with constants.",
        ))
    }

    fn transform_lists(&self, _lists: &mut [Vec<Metric>]) -> Result<Vec<Metric>, TransformError> {
        Err(TransformError::unsupported(
            "Identity transform doesn't support list of list.",
        ))
    }

    fn result_scope_name(&self) -> &'static str {
        Function::Identity.name()
    }
}
