//! 业务逻辑服务层

mod detail_service;
mod sidebar;

pub use detail_service::{DetailService, LoadOutcome};
pub use sidebar::GuidepostSidebar;

use std::sync::Arc;

use guidepost_provider::{AttributesSource, DestinationSource, Sources};

use crate::fields::DisplaySpec;

/// 服务上下文 - 持有所有依赖
///
/// The host creates this once per sidebar and injects the data sources and
/// the field declaration of its container.
pub struct ServiceContext {
    /// 路标属性数据源
    pub attributes: Arc<dyn AttributesSource>,
    /// 方向牌数据源
    pub destinations: Arc<dyn DestinationSource>,
    /// Fields the container can show
    pub display: DisplaySpec,
}

impl ServiceContext {
    /// 创建服务上下文
    #[must_use]
    pub fn new(
        attributes: Arc<dyn AttributesSource>,
        destinations: Arc<dyn DestinationSource>,
        display: DisplaySpec,
    ) -> Self {
        Self {
            attributes,
            destinations,
            display,
        }
    }

    /// Build from the sources created by `guidepost_provider::create_sources`.
    #[must_use]
    pub fn from_sources(sources: Sources, display: DisplaySpec) -> Self {
        Self::new(sources.attributes, sources.destinations, display)
    }
}
