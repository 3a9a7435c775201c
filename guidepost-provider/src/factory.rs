use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::providers::{HttpAttributesSource, HttpDestinationSource};
use crate::traits::{AttributesSource, DestinationSource};

/// Both data sources, ready to be handed to the sidebar.
#[derive(Clone)]
pub struct Sources {
    pub attributes: Arc<dyn AttributesSource>,
    pub destinations: Arc<dyn DestinationSource>,
}

/// Create both HTTP sources from one configuration.
///
/// The configuration is validated first; both sources share one client.
pub fn create_sources(config: &ServiceConfig) -> Result<Sources> {
    config.validate()?;
    let client = HttpUtils::build_client(config)?;
    Ok(Sources {
        attributes: Arc::new(HttpAttributesSource::with_client(client.clone(), config)?),
        destinations: Arc::new(HttpDestinationSource::with_client(client, config)?),
    })
}
