//! HTTP implementations of the data-source traits.

mod attributes;
mod destinations;

pub use attributes::HttpAttributesSource;
pub use destinations::HttpDestinationSource;
