//! # arrgauge client
//!
//! Request client for the REST control plane of the *arr application family.
//!
//! ```rust,no_run
//! use arrgauge_client::{ArrClient, ClientResult, QueryParams};
//! use arrgauge_core::{model::BlockList, ApiKey, AppDescriptor, AppFamily};
//! use std::sync::Arc;
//!
//! # async fn example() -> ClientResult<()> {
//! let app = Arc::new(AppDescriptor::new(
//!     AppFamily::Sonarr,
//!     "http://sonarr:8989",
//!     ApiKey::new("your-api-key"),
//! ));
//!
//! let client = ArrClient::new(app)?;
//! let page: BlockList = client
//!     .do_request("blocklist", &QueryParams::new().with("page", "1"))
//!     .await?;
//! println!("{} blocked releases", page.total_records);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod query;

pub use client::ArrClient;
pub use error::{ClientError, ClientResult};
pub use query::QueryParams;
