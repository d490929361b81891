use crate::collector::{Collected, Collection, Collector};
use crate::context::ScrapeContext;
use crate::error::CollectResult;
use arrgauge_client::{ArrClient, ClientResult, QueryParams};
use arrgauge_core::{AppDescriptor, MetricDescriptor};
use std::sync::Arc;
use tracing::{debug, error, warn, Instrument};

/// One monitored resource: where to fetch it and how to encode it.
///
/// `fetch` is the only place that talks to the network. Most resources issue
/// a single request for `path()` with `params()`; those needing several
/// requests keep them sequential. `encode` is pure.
#[async_trait::async_trait]
pub trait Resource: Send + Sync + 'static {
    type Payload: Send + 'static;

    fn name(&self) -> &'static str;

    /// Metric subsystem, also used for the error sentinel name.
    fn subsystem(&self) -> &'static str;

    fn path(&self) -> &'static str;

    fn params(&self) -> QueryParams {
        QueryParams::new()
    }

    fn descriptors(&self) -> Vec<Arc<MetricDescriptor>>;

    async fn fetch(&self, client: &ArrClient, ctx: &ScrapeContext) -> ClientResult<Self::Payload>;

    fn encode(&self, payload: Self::Payload, ctx: &ScrapeContext) -> CollectResult<Collected>;
}

/// Generic collector driving any [`Resource`].
pub struct ResourceCollector<R> {
    app: Arc<AppDescriptor>,
    resource: R,
    error_descriptor: Arc<MetricDescriptor>,
}

impl<R: Resource> ResourceCollector<R> {
    pub fn new(app: Arc<AppDescriptor>, resource: R) -> Self {
        let error_descriptor = Arc::new(MetricDescriptor::collector_error(
            app.namespace(),
            resource.subsystem(),
            &app.base_url,
        ));

        Self {
            app,
            resource,
            error_descriptor,
        }
    }

    pub fn resource(&self) -> &R {
        &self.resource
    }

    async fn run(&self, ctx: &ScrapeContext) -> CollectResult<Collected> {
        let client = ArrClient::new(self.app.clone())?;
        let payload = self.resource.fetch(&client, ctx).await?;
        self.resource.encode(payload, ctx)
    }
}

#[async_trait::async_trait]
impl<R: Resource> Collector for ResourceCollector<R> {
    fn name(&self) -> &str {
        self.resource.name()
    }

    fn app(&self) -> &Arc<AppDescriptor> {
        &self.app
    }

    fn describe(&self) -> Vec<Arc<MetricDescriptor>> {
        let mut descriptors = self.resource.descriptors();
        descriptors.push(self.error_descriptor.clone());
        descriptors
    }

    fn error_descriptor(&self) -> &Arc<MetricDescriptor> {
        &self.error_descriptor
    }

    async fn collect(&self, ctx: &ScrapeContext) -> Collection {
        let result = async {
            let result = self.run(ctx).await;
            match &result {
                Ok(collected) => {
                    for record_error in &collected.record_errors {
                        warn!(error = %record_error, "skipped record");
                    }
                    debug!(samples = collected.samples.len(), "collection finished");
                }
                Err(e) => error!(error = %e, "collection failed"),
            }
            result
        }
        .instrument(ctx.span().clone())
        .await;

        Collection::new(self.resource.name(), self.error_descriptor.clone(), result)
    }
}
