//! # guidepost-provider
//!
//! Data sources behind the guidepost sidebar.
//!
//! A guidepost is described by two independent remote services:
//!
//! | Source | Trait | Endpoint |
//! |--------|-------|----------|
//! | Attributes API | [`AttributesSource`] | `GET <api_url>/details/guidepost/<id>` |
//! | Destination sign generator | [`DestinationSource`] | `GET <destination_url>?nodeid=<id>&namedroutes&fromarrow&format=json&distunit=km&fast=1` |
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)* — Use the platform's native TLS implementation.
//! - **`rustls`** — Use rustls. Recommended for cross-compilation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use guidepost_provider::{create_sources, GuidePostId, ServiceConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let sources = create_sources(&ServiceConfig::default())?;
//!
//!     let id = GuidePostId::new("2287441025");
//!     let attributes = sources.attributes.fetch_attributes(&id).await?;
//!     println!("{:?}", attributes.coordinate());
//!
//!     let node = attributes.node_id().unwrap_or(id);
//!     for destination in sources.destinations.fetch_destinations(&node).await? {
//!         println!("{:>3}° {}", destination.direction, destination.destination);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every source operation returns [`Result<T, ProviderError>`](ProviderError).
//! Nothing is retried: a failed fetch is reported once and the caller decides
//! what to show.

mod config;
mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

pub use config::{DEFAULT_API_URL, DEFAULT_DESTINATION_URL, ServiceConfig};
pub use error::{ProviderError, Result};
pub use factory::{Sources, create_sources};
pub use providers::{HttpAttributesSource, HttpDestinationSource};
pub use traits::{AttributesSource, DestinationSource};
pub use types::{Destination, DestinationResponse, GuidePostAttributes, GuidePostId};
