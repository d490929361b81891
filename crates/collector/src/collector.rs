use crate::context::ScrapeContext;
use crate::error::{CollectError, CollectResult};
use arrgauge_core::{AppDescriptor, MetricDescriptor, Reading, Sample};
use std::sync::Arc;

/// Describe/collect contract driven by the scrape scheduler.
#[async_trait::async_trait]
pub trait Collector: Send + Sync {
    /// Short resource name, used for logging.
    fn name(&self) -> &str;

    /// Application instance this collector targets.
    fn app(&self) -> &Arc<AppDescriptor>;

    /// Fixed descriptors followed by the error sentinel descriptor.
    fn describe(&self) -> Vec<Arc<MetricDescriptor>>;

    /// Descriptor used for invalid-metric emissions.
    fn error_descriptor(&self) -> &Arc<MetricDescriptor>;

    /// Fetch and encode the resource. Never panics; failures are part of the
    /// returned [`Collection`].
    async fn collect(&self, ctx: &ScrapeContext) -> Collection;
}

/// Samples gathered by a successful collect.
///
/// `record_errors` holds failures scoped to single records; they did not
/// stop the remaining records from being encoded.
#[derive(Debug, Default)]
pub struct Collected {
    pub samples: Vec<Sample>,
    pub record_errors: Vec<CollectError>,
}

impl Collected {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a reading to its descriptor and keep it.
    pub fn push(&mut self, descriptor: &Arc<MetricDescriptor>, reading: Reading) -> CollectResult<()> {
        self.samples.push(Sample::new(descriptor, reading)?);
        Ok(())
    }

    pub fn push_scalar(&mut self, descriptor: &Arc<MetricDescriptor>, value: f64) -> CollectResult<()> {
        self.push(descriptor, Reading::scalar(value))
    }

    pub fn record_error(&mut self, error: impl Into<CollectError>) {
        self.record_errors.push(error.into());
    }
}

/// One item of a collector's output stream.
#[derive(Debug)]
pub enum Emission<'a> {
    Sample(&'a Sample),
    Invalid {
        descriptor: &'a Arc<MetricDescriptor>,
        error: &'a CollectError,
    },
}

/// Outcome of one collect call.
#[derive(Debug)]
pub struct Collection {
    pub collector: String,
    pub error_descriptor: Arc<MetricDescriptor>,
    pub result: CollectResult<Collected>,
}

impl Collection {
    pub fn new(collector: impl Into<String>, error_descriptor: Arc<MetricDescriptor>, result: CollectResult<Collected>) -> Self {
        Self {
            collector: collector.into(),
            error_descriptor,
            result,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.result.is_err()
    }

    /// Data samples; empty when the collection failed.
    pub fn samples(&self) -> &[Sample] {
        match &self.result {
            Ok(collected) => &collected.samples,
            Err(_) => &[],
        }
    }

    /// Flatten the result into the emission stream seen by the exposition.
    ///
    /// A failed collection yields exactly one invalid emission and nothing
    /// else. A successful one yields its samples followed by one invalid
    /// emission per record-scoped error.
    pub fn emissions(&self) -> Vec<Emission<'_>> {
        match &self.result {
            Err(error) => vec![Emission::Invalid {
                descriptor: &self.error_descriptor,
                error,
            }],
            Ok(collected) => collected
                .samples
                .iter()
                .map(Emission::Sample)
                .chain(collected.record_errors.iter().map(|error| Emission::Invalid {
                    descriptor: &self.error_descriptor,
                    error,
                }))
                .collect(),
        }
    }

    /// Number of invalid emissions in this collection.
    pub fn invalid_count(&self) -> usize {
        match &self.result {
            Err(_) => 1,
            Ok(collected) => collected.record_errors.len(),
        }
    }
}
