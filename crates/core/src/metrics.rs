use crate::error::MetricError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Help text shared by every collector error sentinel.
pub const COLLECTOR_ERROR_HELP: &str = "Error while collecting metrics";

/// Join the non-empty parts of a metric name with `_`.
pub fn fq_name(namespace: &str, subsystem: &str, name: &str) -> String {
    [namespace, subsystem, name]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("_")
}

/// Static description of a gauge: name, help, label layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricDescriptor {
    pub fq_name: String,
    pub help: String,
    pub variable_labels: Vec<String>,
    pub const_labels: Vec<(String, String)>,
}

impl MetricDescriptor {
    pub fn new(fq_name: impl Into<String>, help: impl Into<String>, variable_labels: &[&str]) -> Self {
        Self {
            fq_name: fq_name.into(),
            help: help.into(),
            variable_labels: variable_labels.iter().map(|l| l.to_string()).collect(),
            const_labels: Vec::new(),
        }
    }

    /// Add a constant label attached to every sample of this descriptor.
    pub fn with_const_label(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.const_labels.push((name.into(), value.into()));
        self
    }

    /// The error sentinel descriptor for a collector.
    pub fn collector_error(namespace: &str, subsystem: &str, url: &str) -> Self {
        Self::new(
            fq_name(namespace, subsystem, "collector_error"),
            COLLECTOR_ERROR_HELP,
            &[],
        )
        .with_const_label("url", url)
    }

    pub fn arity(&self) -> usize {
        self.variable_labels.len()
    }
}

/// Value plus ordered label values, before being bound to a descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub value: f64,
    pub labels: Vec<String>,
}

impl Reading {
    pub fn new(value: f64, labels: Vec<String>) -> Self {
        Self { value, labels }
    }

    /// A reading with no variable labels.
    pub fn scalar(value: f64) -> Self {
        Self {
            value,
            labels: Vec::new(),
        }
    }
}

/// One labeled observation produced during a scrape.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub descriptor: Arc<MetricDescriptor>,
    pub value: f64,
    pub label_values: Vec<String>,
}

impl Sample {
    /// Bind a reading to a descriptor.
    ///
    /// The number of label values must equal the descriptor's variable label
    /// count; anything else is an error.
    pub fn new(descriptor: &Arc<MetricDescriptor>, reading: Reading) -> Result<Self, MetricError> {
        if reading.labels.len() != descriptor.arity() {
            return Err(MetricError::LabelArity {
                metric: descriptor.fq_name.clone(),
                expected: descriptor.arity(),
                actual: reading.labels.len(),
            });
        }

        Ok(Self {
            descriptor: descriptor.clone(),
            value: reading.value,
            label_values: reading.labels,
        })
    }

    pub fn scalar(descriptor: &Arc<MetricDescriptor>, value: f64) -> Result<Self, MetricError> {
        Self::new(descriptor, Reading::scalar(value))
    }

    /// Variable and constant labels as name/value pairs, variable labels first.
    pub fn labels(&self) -> Vec<(&str, &str)> {
        self.descriptor
            .variable_labels
            .iter()
            .map(String::as_str)
            .zip(self.label_values.iter().map(String::as_str))
            .chain(
                self.descriptor
                    .const_labels
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str())),
            )
            .collect()
    }

    /// Value of a single label, if present.
    pub fn label(&self, name: &str) -> Option<&str> {
        self.labels()
            .into_iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> Arc<MetricDescriptor> {
        Arc::new(
            MetricDescriptor::new("sonarr_diskspace_free_bytes", "Free space", &["path", "label"])
                .with_const_label("url", "http://localhost:8989"),
        )
    }

    #[test]
    fn test_fq_name_skips_empty_parts() {
        assert_eq!(fq_name("sonarr", "", "update"), "sonarr_update");
        assert_eq!(fq_name("sonarr", "logs", "total"), "sonarr_logs_total");
        assert_eq!(fq_name("", "", "up"), "up");
    }

    #[test]
    fn test_sample_with_matching_arity() {
        let desc = descriptor();
        let sample = Sample::new(&desc, Reading::new(42.0, vec!["/tv".into(), "media".into()])).unwrap();

        assert_eq!(sample.value, 42.0);
        assert_eq!(sample.label("path"), Some("/tv"));
        assert_eq!(sample.label("label"), Some("media"));
        assert_eq!(sample.label("url"), Some("http://localhost:8989"));
    }

    #[test]
    fn test_sample_rejects_too_few_labels() {
        let desc = descriptor();
        let err = Sample::new(&desc, Reading::new(1.0, vec!["/tv".into()])).unwrap_err();

        match err {
            MetricError::LabelArity { expected, actual, .. } => {
                assert_eq!(expected, 2);
                assert_eq!(actual, 1);
            }
        }
    }

    #[test]
    fn test_sample_rejects_too_many_labels() {
        let desc = descriptor();
        let reading = Reading::new(1.0, vec!["a".into(), "b".into(), "c".into()]);
        assert!(Sample::new(&desc, reading).is_err());
    }

    #[test]
    fn test_collector_error_descriptor() {
        let desc = MetricDescriptor::collector_error("radarr", "logs", "http://radarr");
        assert_eq!(desc.fq_name, "radarr_logs_collector_error");
        assert_eq!(desc.help, COLLECTOR_ERROR_HELP);
        assert_eq!(desc.arity(), 0);
        assert_eq!(desc.const_labels, vec![("url".to_string(), "http://radarr".to_string())]);
    }
}
