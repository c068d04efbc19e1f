use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MetricError {
    #[error("Scope cannot be null or empty.")]
    EmptyScope,

    #[error("Metric cannot be null or empty.")]
    EmptyMetric,

    #[error("Tag cannot be null or empty.")]
    EmptyTagKey,

    #[error("Tag {0} is a reserved tag name.")]
    ReservedTag(String),
}

/// Tag names that carry metric attributes and can't be used as user tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservedField {
    Meta,
    Units,
    DisplayName,
}

impl ReservedField {
    pub const ALL: [ReservedField; 3] = [
        ReservedField::Meta,
        ReservedField::Units,
        ReservedField::DisplayName,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ReservedField::Meta => "meta",
            ReservedField::Units => "units",
            ReservedField::DisplayName => "displayName",
        }
    }

    pub fn is_reserved(key: &str) -> bool {
        Self::ALL.iter().any(|field| field.key() == key)
    }
}

/// A time series for a single metric within a scope.
///
/// Tags are kept in a [`BTreeMap`], so iterating them always yields keys in
/// ascending lexical order. Transforms that derive labels from "all tags"
/// inherit that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "MetricDocument")]
pub struct Metric {
    scope: String,
    metric: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    units: Option<String>,
    tags: BTreeMap<String, String>,
    datapoints: BTreeMap<i64, f64>,
}

impl Metric {
    pub fn new(scope: impl AsRef<str>, metric: impl AsRef<str>) -> Result<Self, MetricError> {
        let mut this = Self {
            scope: String::new(),
            metric: String::new(),
            namespace: None,
            display_name: None,
            units: None,
            tags: BTreeMap::new(),
            datapoints: BTreeMap::new(),
        };

        this.set_scope(scope)?;
        this.set_metric(metric)?;

        Ok(this)
    }

    pub fn scope(&self) -> &str {
        self.scope.as_str()
    }

    pub fn set_scope(&mut self, scope: impl AsRef<str>) -> Result<(), MetricError> {
        let scope = scope.as_ref();

        if scope.trim().is_empty() {
            return Err(MetricError::EmptyScope);
        }

        self.scope = scope.to_string();
        Ok(())
    }

    pub fn metric(&self) -> &str {
        self.metric.as_str()
    }

    pub fn set_metric(&mut self, metric: impl AsRef<str>) -> Result<(), MetricError> {
        let metric = metric.as_ref();

        if metric.trim().is_empty() {
            return Err(MetricError::EmptyMetric);
        }

        self.metric = metric.to_string();
        Ok(())
    }

    /// `None` means the metric belongs to the global namespace.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn set_namespace(&mut self, namespace: Option<String>) {
        self.namespace = namespace;
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn set_display_name(&mut self, display_name: impl Into<String>) {
        self.display_name = Some(display_name.into());
    }

    pub fn units(&self) -> Option<&str> {
        self.units.as_deref()
    }

    pub fn set_units(&mut self, units: Option<String>) {
        self.units = units;
    }

    pub fn tags(&self) -> &BTreeMap<String, String> {
        &self.tags
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// Sets a single user tag. An empty value removes the tag.
    pub fn set_tag(
        &mut self,
        key: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<(), MetricError> {
        let key = check_tag_key(key.as_ref())?;
        let value = value.as_ref();

        if value.is_empty() {
            self.tags.remove(key);
        } else {
            self.tags.insert(key.to_string(), value.to_string());
        }

        Ok(())
    }

    /// Replaces every tag. Nothing is replaced if one of the keys is rejected.
    pub fn set_tags(&mut self, tags: BTreeMap<String, String>) -> Result<(), MetricError> {
        for key in tags.keys() {
            check_tag_key(key)?;
        }

        self.tags = tags;
        Ok(())
    }

    pub fn datapoints(&self) -> &BTreeMap<i64, f64> {
        &self.datapoints
    }

    pub fn set_datapoints(&mut self, datapoints: BTreeMap<i64, f64>) {
        self.datapoints = datapoints;
    }

    pub fn add_datapoints(&mut self, datapoints: impl IntoIterator<Item = (i64, f64)>) {
        self.datapoints.extend(datapoints);
    }

    /// `<namespace>:<scope>:<metric>{k=v,...}` with tags sorted by key.
    pub fn identifier(&self) -> String {
        let tags = self
            .tags
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join(",");

        format!(
            "{}:{}:{}{{{}}}",
            self.namespace.as_deref().unwrap_or("null"),
            self.scope,
            self.metric,
            tags
        )
    }
}

fn check_tag_key(key: &str) -> Result<&str, MetricError> {
    if key.is_empty() {
        return Err(MetricError::EmptyTagKey);
    }

    if ReservedField::is_reserved(key) {
        return Err(MetricError::ReservedTag(key.to_string()));
    }

    Ok(key)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetricDocument {
    scope: String,
    metric: String,
    #[serde(default)]
    namespace: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    units: Option<String>,
    #[serde(default)]
    tags: BTreeMap<String, String>,
    #[serde(default)]
    datapoints: BTreeMap<i64, f64>,
}

impl TryFrom<MetricDocument> for Metric {
    type Error = MetricError;

    fn try_from(doc: MetricDocument) -> Result<Self, Self::Error> {
        let mut metric = Metric::new(doc.scope, doc.metric)?;

        metric.set_tags(doc.tags)?;
        metric.set_namespace(doc.namespace);
        metric.display_name = doc.display_name;
        metric.set_units(doc.units);
        metric.set_datapoints(doc.datapoints);

        Ok(metric)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_blank_scope_and_metric() {
        assert_eq!(Metric::new("  ", "cpu"), Err(MetricError::EmptyScope));
        assert_eq!(Metric::new("host", ""), Err(MetricError::EmptyMetric));
    }

    #[test]
    fn test_reserved_tags_are_rejected() {
        let mut metric = Metric::new("host", "cpu").unwrap();

        assert_eq!(
            metric.set_tag("displayName", "nope"),
            Err(MetricError::ReservedTag("displayName".to_string()))
        );

        let mut tags = BTreeMap::new();
        tags.insert("host".to_string(), "h1".to_string());
        tags.insert("units".to_string(), "ms".to_string());

        assert!(metric.set_tags(tags).is_err());
        assert!(metric.tags().is_empty());
    }

    #[test]
    fn test_empty_tag_value_removes_tag() {
        let mut metric = Metric::new("host", "cpu").unwrap();

        metric.set_tag("host", "h1").unwrap();
        assert_eq!(metric.tag("host"), Some("h1"));

        metric.set_tag("host", "").unwrap();
        assert_eq!(metric.tag("host"), None);
    }

    #[test]
    fn test_identifier_sorts_tags() {
        let mut metric = Metric::new("system.dc1", "cpu.idle").unwrap();
        metric.set_namespace(Some("ns".to_string()));
        metric.set_tag("region", "us").unwrap();
        metric.set_tag("host", "h1").unwrap();

        assert_eq!(metric.identifier(), "ns:system.dc1:cpu.idle{host=h1,region=us}");

        let bare = Metric::new("system.dc1", "cpu.idle").unwrap();
        assert_eq!(bare.identifier(), "null:system.dc1:cpu.idle{}");
    }

    #[test]
    fn test_json_uses_camel_case_and_validates() {
        let metric: Metric = serde_json::from_str(
            r#"{"scope":"s","metric":"m","displayName":"label","tags":{"host":"h1"},"datapoints":{"1000":1.5}}"#,
        )
        .unwrap();

        assert_eq!(metric.display_name(), Some("label"));
        assert_eq!(metric.tag("host"), Some("h1"));
        assert_eq!(metric.datapoints().get(&1000), Some(&1.5));
        assert_eq!(metric.units(), None);

        let value = serde_json::to_value(&metric).unwrap();
        assert_eq!(value["displayName"], "label");
        assert!(value.get("units").is_none());

        let with_units: Metric = serde_json::from_str(
            r#"{"scope":"s","metric":"m","units":"ms","datapoints":{"1":2.0,"3":4.0}}"#,
        )
        .unwrap();
        assert_eq!(with_units.units(), Some("ms"));
        assert_eq!(with_units.datapoints().len(), 2);

        let bad = serde_json::from_str::<Metric>(r#"{"scope":"s","metric":"m","tags":{"meta":"x"}}"#);
        assert!(bad.is_err());
    }
}
