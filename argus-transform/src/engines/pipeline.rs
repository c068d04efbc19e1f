use argus_core::{
    config::{Configuration, TransformDecl},
    Metric, TransformError,
};
use eyre::WrapErr;

/// Runs a declared list of transforms, in order, over a set of metrics.
pub struct Pipeline {
    stages: Vec<TransformDecl>,
}

impl Pipeline {
    pub fn start(conf: Configuration) -> Self {
        Self {
            stages: conf.transforms,
        }
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn stage_names(&self) -> impl Iterator<Item = &str> {
        self.stages.iter().map(|s| s.name.as_str())
    }

    /// Applies every stage. Stops at the first failing stage, leaving the
    /// metrics as the previous stages left them.
    pub fn run<'a>(&self, metrics: Option<&'a mut Vec<Metric>>) -> eyre::Result<&'a mut [Metric]> {
        let mut metrics = match metrics {
            Some(metrics) => metrics.as_mut_slice(),
            None => {
                return Err(TransformError::invalid_argument(
                    "Cannot transform null metric/metrics",
                ))
                .wrap_err("Pipeline received no metrics");
            }
        };

        for stage in self.stages.iter() {
            let outcome = match stage.constants.as_deref() {
                None => stage.transform.transform(metrics),
                Some(constants) => stage.transform.transform_with_constants(metrics, constants),
            };

            metrics = match outcome {
                Ok(metrics) => metrics,
                Err(e) => {
                    tracing::error!(
                        target = "pipeline",
                        "Stage '{}' ({}) failed: {}",
                        stage.name,
                        stage.transform.result_scope_name(),
                        e
                    );

                    return Err(e).wrap_err_with(|| format!("Stage '{}' failed", stage.name));
                }
            };

            tracing::debug!(
                target = "pipeline",
                "Stage '{}' ({}) processed {} metric(s)",
                stage.name,
                stage.transform.result_scope_name(),
                metrics.len()
            );
        }

        Ok(metrics)
    }
}
