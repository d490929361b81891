//! Text exposition of one scrape.
//!
//! Every scrape renders into a fresh [`prometheus::Registry`]; nothing is
//! cached between scrapes, so a resource that disappears also disappears from
//! the output.

use arrgauge_collector::{Collection, Emission};
use arrgauge_core::MetricDescriptor;
use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::{debug, error, warn};

pub const CONTENT_TYPE: &str = prometheus::TEXT_FORMAT;

#[derive(Debug, Error)]
pub enum ExpositionError {
    #[error("failed to expose metric {metric}: {source}")]
    Gauge {
        metric: String,
        #[source]
        source: prometheus::Error,
    },

    #[error("failed to encode metrics: {0}")]
    Encode(#[from] prometheus::Error),

    #[error("encoded metrics are not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

type GaugeKey = (String, Vec<(String, String)>);

/// Gauges registered so far in this scrape, keyed by name and const labels.
///
/// `written` remembers every label set already set so a second write to the
/// same series is reported instead of silently replacing the first.
#[derive(Default)]
struct ScrapeRegistry {
    registry: Registry,
    gauges: HashMap<GaugeKey, GaugeVec>,
    written: HashSet<(GaugeKey, Vec<String>)>,
    collapsed: usize,
}

impl ScrapeRegistry {
    fn gauge(&mut self, descriptor: &MetricDescriptor) -> Result<&GaugeVec, ExpositionError> {
        let gauge_error = |source| ExpositionError::Gauge {
            metric: descriptor.fq_name.clone(),
            source,
        };

        match self
            .gauges
            .entry((descriptor.fq_name.clone(), descriptor.const_labels.clone()))
        {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let opts = Opts::new(descriptor.fq_name.clone(), descriptor.help.clone())
                    .const_labels(descriptor.const_labels.iter().cloned().collect());
                let labels: Vec<&str> = descriptor.variable_labels.iter().map(String::as_str).collect();

                let gauge = GaugeVec::new(opts, &labels).map_err(gauge_error)?;
                self.registry.register(Box::new(gauge.clone())).map_err(gauge_error)?;
                Ok(entry.insert(gauge))
            }
        }
    }

    fn set(&mut self, descriptor: &MetricDescriptor, label_values: &[String], value: f64) -> Result<(), ExpositionError> {
        let values: Vec<&str> = label_values.iter().map(String::as_str).collect();
        let gauge = self.gauge(descriptor)?;
        gauge
            .get_metric_with_label_values(&values)
            .map_err(|source| ExpositionError::Gauge {
                metric: descriptor.fq_name.clone(),
                source,
            })?
            .set(value);

        let key = (descriptor.fq_name.clone(), descriptor.const_labels.clone());
        if !self.written.insert((key, label_values.to_vec())) {
            self.collapsed += 1;
            warn!(
                metric = %descriptor.fq_name,
                labels = ?label_values,
                "label set written twice in one scrape, keeping the last value"
            );
        }
        Ok(())
    }

    fn encode(&self) -> Result<String, ExpositionError> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

/// Render collections in the Prometheus text format.
///
/// Invalid emissions of a collector become its error gauge, valued with the
/// number of invalid emissions. A sample that cannot be exposed is dropped and
/// logged; the rest of the scrape is still rendered.
pub fn render(collections: &[Collection]) -> String {
    let mut scrape = ScrapeRegistry::default();

    for collection in collections {
        let mut invalid = 0usize;
        for emission in collection.emissions() {
            match emission {
                Emission::Sample(sample) => {
                    if let Err(e) = scrape.set(&sample.descriptor, &sample.label_values, sample.value) {
                        warn!(collector = %collection.collector, error = %e, "dropped sample");
                    }
                }
                Emission::Invalid { .. } => invalid += 1,
            }
        }

        if invalid > 0 {
            if let Err(e) = scrape.set(&collection.error_descriptor, &[], invalid as f64) {
                warn!(collector = %collection.collector, error = %e, "dropped collector error gauge");
            }
        }
    }

    match scrape.encode() {
        Ok(body) => {
            debug!(collections = collections.len(), bytes = body.len(), "rendered scrape");
            body
        }
        Err(e) => {
            error!(error = %e, "failed to render scrape");
            String::new()
        }
    }
}
