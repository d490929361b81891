// Collectors for the *arr application family: the describe/collect contract,
// the generic resource collector, one resource per endpoint and the registry
// that runs them on each scrape.

pub mod collector;
pub mod context;
pub mod error;
pub mod registry;
pub mod resource;
pub mod resources;

pub use collector::{Collected, Collection, Collector, Emission};
pub use context::ScrapeContext;
pub use error::{CollectError, CollectResult};
pub use registry::CollectorRegistry;
pub use resource::{Resource, ResourceCollector};
pub use resources::collectors_for;
