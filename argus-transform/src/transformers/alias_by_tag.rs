use argus_core::{Metric, Transform, TransformError};

use crate::Function;

const DELIMITER: &str = ",";

/// Sets each metric's display name from its tag values, joined with `,`.
///
/// Without constants every tag value is used, in tag key order. With
/// constants, only the listed tag keys are used, in the listed order, and keys
/// a metric doesn't carry are skipped. A metric that yields no value keeps its
/// current display name.
#[derive(Debug, Default, Clone, Copy)]
pub struct AliasByTag;

impl AliasByTag {
    pub fn new() -> Self {
        Self
    }
}

fn join_values<'v>(values: impl Iterator<Item = &'v str>) -> Option<String> {
    let values = values.collect::<Vec<_>>();

    if values.is_empty() {
        return None;
    }

    Some(values.join(DELIMITER))
}

impl Transform for AliasByTag {
    fn transform<'a>(
        &self,
        metrics: &'a mut [Metric],
    ) -> Result<&'a mut [Metric], TransformError> {
        for metric in metrics.iter_mut() {
            let label = join_values(metric.tags().values().map(String::as_str));

            if let Some(label) = label {
                metric.set_display_name(label);
            }
        }

        Ok(metrics)
    }

    fn transform_with_constants<'a>(
        &self,
        metrics: &'a mut [Metric],
        constants: &[String],
    ) -> Result<&'a mut [Metric], TransformError> {
        if constants.is_empty() {
            return Err(TransformError::invalid_argument(
                "Tag keys list cannot be null or empty.",
            ));
        }

        for metric in metrics.iter_mut() {
            let label = join_values(constants.iter().filter_map(|key| metric.tag(key)));

            if let Some(label) = label {
                metric.set_display_name(label);
            }
        }

        Ok(metrics)
    }

    fn transform_lists(&self, _lists: &mut [Vec<Metric>]) -> Result<Vec<Metric>, TransformError> {
        Err(TransformError::unsupported(
            "this transform does not operate over multiple metric lists.",
        ))
    }

    fn result_scope_name(&self) -> &'static str {
        Function::AliasByTag.name()
    }
}
