//! Guidepost Sidebar Core Library
//!
//! Loads a guidepost's details and destination sign into a map sidebar:
//! - Identifier resolution from navigation state (`navigation`)
//! - Attribute-to-field projection (`fields`)
//! - Destination table ordering and formatting (`destinations`)
//! - Load coordination across both data sources (`services`)
//!
//! The host page is reached only through [`SidebarView`]; the data sources
//! come from `guidepost-provider` and can be swapped through its traits.

pub mod destinations;
pub mod error;
pub mod fields;
pub mod navigation;
pub mod services;
pub mod view;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use fields::{DisplaySpec, FieldKind, FieldMapping, FieldSpec};
pub use services::{DetailService, GuidepostSidebar, LoadOutcome, ServiceContext};
pub use view::{BoundingBox, DestinationRow, FieldContent, Region, SidebarView};

pub use guidepost_provider::{
    AttributesSource, Destination, DestinationSource, GuidePostAttributes, GuidePostId,
    ProviderError, ServiceConfig,
};
