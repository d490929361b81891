// Core types for arrgauge: application descriptors, metric model, payload
// shapes and the pure encoders that turn payloads into gauge readings.

pub mod app;
pub mod encode;
pub mod error;
pub mod metrics;
pub mod model;

pub use app::{api_prefix, ApiKey, ApiVersion, AppDescriptor, AppFamily};
pub use error::{EncodeError, MetricError};
pub use metrics::{fq_name, MetricDescriptor, Reading, Sample};
