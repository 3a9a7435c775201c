use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Destination, GuidePostAttributes, GuidePostId};

/// 路标属性数据源
#[async_trait]
pub trait AttributesSource: Send + Sync {
    /// Service identifier used in logs and errors.
    fn id(&self) -> &'static str;

    /// Fetch the attribute bag of one guidepost.
    async fn fetch_attributes(&self, id: &GuidePostId) -> Result<GuidePostAttributes>;
}

/// 路标方向牌数据源
///
/// Returns destinations in whatever order the service produced; sorting is
/// the display layer's job.
#[async_trait]
pub trait DestinationSource: Send + Sync {
    /// Service identifier used in logs and errors.
    fn id(&self) -> &'static str;

    /// Fetch the destination records for a guidepost node.
    async fn fetch_destinations(&self, node_id: &GuidePostId) -> Result<Vec<Destination>>;
}
