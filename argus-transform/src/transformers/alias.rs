use argus_core::{Metric, Transform, TransformError};
use regex::Regex;

use crate::Function;

/// Renames metrics, and optionally their scope.
///
/// Constants come in `(alias, type)` pairs: the first pair applies to the
/// metric name, the optional second one to the scope. `type` is either
/// `literal`, which replaces the name, or `regex`, where the alias reads
/// `/<pattern>/<replacement>/` and every match in the name is replaced.
#[derive(Debug, Default, Clone, Copy)]
pub struct Alias;

impl Alias {
    pub fn new() -> Self {
        Self
    }
}

enum Rename {
    Literal(String),
    Regex { pattern: Regex, replacement: String },
}

impl Rename {
    fn parse(alias: &str, kind: &str) -> Result<Self, TransformError> {
        if kind.eq_ignore_ascii_case("literal") {
            if alias.trim().is_empty() {
                return Err(TransformError::invalid_argument(
                    "Alias cannot be an empty string.",
                ));
            }

            return Ok(Rename::Literal(alias.to_string()));
        }

        if kind.eq_ignore_ascii_case("regex") {
            let parts = alias
                .strip_prefix('/')
                .and_then(|rest| rest.strip_suffix('/'))
                .and_then(|inner| inner.split_once('/'));

            let (pattern, replacement) = parts.ok_or_else(|| {
                TransformError::invalid_argument(format!(
                    "Regex alias '{}' must have the form /<pattern>/<replacement>/.",
                    alias
                ))
            })?;

            let pattern = Regex::new(pattern).map_err(|e| {
                TransformError::invalid_argument(format!("Invalid regex '{}': {}", pattern, e))
            })?;

            return Ok(Rename::Regex {
                pattern,
                replacement: replacement.to_string(),
            });
        }

        Err(TransformError::invalid_argument(format!(
            "Invalid alias type '{}', expecting 'literal' or 'regex'.",
            kind
        )))
    }

    fn apply(&self, name: &str) -> String {
        match self {
            Rename::Literal(alias) => alias.clone(),
            Rename::Regex {
                pattern,
                replacement,
            } => pattern.replace_all(name, replacement.as_str()).into_owned(),
        }
    }
}

impl Transform for Alias {
    fn transform<'a>(
        &self,
        _metrics: &'a mut [Metric],
    ) -> Result<&'a mut [Metric], TransformError> {
        Err(TransformError::unsupported(
            "Alias transform can't be performed without constants.",
        ))
    }

    fn transform_with_constants<'a>(
        &self,
        metrics: &'a mut [Metric],
        constants: &[String],
    ) -> Result<&'a mut [Metric], TransformError> {
        if constants.len() != 2 && constants.len() != 4 {
            return Err(TransformError::invalid_argument(
                "Alias transform requires either 2 or 4 constants.",
            ));
        }

        let metric_rename = Rename::parse(&constants[0], &constants[1])?;
        let scope_rename = match constants.get(2..4) {
            Some([alias, kind]) => Some(Rename::parse(alias, kind)?),
            _ => None,
        };

        let mut renames = Vec::with_capacity(metrics.len());

        for metric in metrics.iter() {
            let name = metric_rename.apply(metric.metric());
            let scope = scope_rename
                .as_ref()
                .map(|rename| rename.apply(metric.scope()));

            if name.trim().is_empty() {
                return Err(TransformError::invalid_argument(format!(
                    "Alias of '{}' results in an empty metric name.",
                    metric.metric()
                )));
            }

            if scope.as_deref().map_or(false, |s| s.trim().is_empty()) {
                return Err(TransformError::invalid_argument(format!(
                    "Alias of '{}' results in an empty scope.",
                    metric.scope()
                )));
            }

            renames.push((name, scope));
        }

        for (metric, (name, scope)) in metrics.iter_mut().zip(renames) {
            metric
                .set_metric(name)
                .map_err(|e| TransformError::invalid_argument(e.to_string()))?;

            if let Some(scope) = scope {
                metric
                    .set_scope(scope)
                    .map_err(|e| TransformError::invalid_argument(e.to_string()))?;
            }
        }

        Ok(metrics)
    }

    fn transform_lists(&self, _lists: &mut [Vec<Metric>]) -> Result<Vec<Metric>, TransformError> {
        Err(TransformError::unsupported(
            "Alias doesn't need list of list.",
        ))
    }

    fn result_scope_name(&self) -> &'static str {
        Function::Alias.name()
    }
}
