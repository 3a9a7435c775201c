//! 路标详情加载服务
//!
//! One call to [`DetailService::load`] is one load cycle:
//!
//! ```text
//! Idle → Loading(primary) ─┬─ PrimaryFailed
//!                          └─ PrimaryLoaded → Loading(secondary) ─┬─ DestinationsFailed
//!                                                                 └─ Complete
//! ```
//!
//! Every cycle takes a new generation number. Completions check it before
//! touching the view, so a slow response from an older cycle can never
//! repopulate regions that a newer cycle has already reset.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::destinations;
use crate::error::CoreError;
use crate::fields::FieldMapping;
use crate::navigation;
use crate::services::ServiceContext;
use crate::view::{BoundingBox, Region, SidebarView};
use crate::{GuidePostAttributes, GuidePostId};

/// Terminal state of one load cycle.
#[derive(Debug)]
pub enum LoadOutcome {
    /// Attributes could not be loaded; destinations were never requested.
    PrimaryFailed(CoreError),
    /// Attributes are shown, destinations failed.
    DestinationsFailed {
        mapping: FieldMapping,
        error: CoreError,
    },
    /// Attributes and destination table are shown.
    Complete { mapping: FieldMapping, rows: usize },
    /// A newer cycle started before this one finished; its remaining
    /// results were dropped.
    Superseded,
}

impl LoadOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete { .. })
    }

    /// Field mapping, when the attributes were shown.
    pub fn mapping(&self) -> Option<&FieldMapping> {
        match self {
            Self::DestinationsFailed { mapping, .. } | Self::Complete { mapping, .. } => {
                Some(mapping)
            }
            Self::PrimaryFailed(_) | Self::Superseded => None,
        }
    }
}

/// Per-cycle context.
struct LoadCycle<'a> {
    generation: u64,
    id: GuidePostId,
    /// Navigation state that triggered the cycle, if any.
    nav_state: Option<&'a str>,
}

enum DestinationStage {
    Rendered(usize),
    Failed(CoreError),
    Stale,
}

/// 路标详情加载服务
pub struct DetailService {
    ctx: Arc<ServiceContext>,
    generation: AtomicU64,
    /// Deep-link target waiting for its first successful load.
    pending_target: Mutex<Option<String>>,
}

impl DetailService {
    /// 创建服务实例（无深链接目标）
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self::with_navigation(ctx, "")
    }

    /// 创建服务实例，记录页面打开时的导航状态
    #[must_use]
    pub fn with_navigation(ctx: Arc<ServiceContext>, initial_nav_state: &str) -> Self {
        Self {
            ctx,
            generation: AtomicU64::new(0),
            pending_target: Mutex::new(navigation::pending_target(initial_nav_state)),
        }
    }

    pub fn context(&self) -> &Arc<ServiceContext> {
        &self.ctx
    }

    /// Generation of the most recently started cycle (0 before the first).
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Whether a deep-link target is still waiting to be framed.
    pub fn has_pending_target(&self) -> bool {
        self.pending_target
            .lock()
            .map_or_else(|poisoned| poisoned.into_inner().is_some(), |guard| guard.is_some())
    }

    /// Load a guidepost that was not selected through navigation.
    pub async fn load(&self, view: &dyn SidebarView, id: GuidePostId) -> LoadOutcome {
        self.run(view, id, None).await
    }

    /// Load a guidepost selected by `nav_state`.
    pub async fn load_from_navigation(
        &self,
        view: &dyn SidebarView,
        id: GuidePostId,
        nav_state: &str,
    ) -> LoadOutcome {
        self.run(view, id, Some(nav_state)).await
    }

    async fn run(
        &self,
        view: &dyn SidebarView,
        id: GuidePostId,
        nav_state: Option<&str>,
    ) -> LoadOutcome {
        let cycle = self.begin(view, id, nav_state);

        let attrs = match self.ctx.attributes.fetch_attributes(&cycle.id).await {
            Ok(attrs) => attrs,
            Err(e) => return self.primary_failed(view, &cycle, e.into()),
        };
        if !self.is_current(cycle.generation) {
            log::debug!(
                "Dropping attributes of guidepost {} (cycle {} superseded)",
                cycle.id,
                cycle.generation
            );
            return LoadOutcome::Superseded;
        }

        // The destination request goes out first; field mapping does not
        // hold it back and neither outcome waits for the other.
        let node_id = attrs.node_id().unwrap_or_else(|| cycle.id.clone());
        let (stage, mapping) = futures::future::join(
            self.load_destinations(view, cycle.generation, &node_id),
            async { self.show_attributes(view, &cycle, &attrs) },
        )
        .await;

        match stage {
            DestinationStage::Rendered(rows) => {
                log::info!(
                    "Guidepost {} loaded: {} fields, {rows} destinations",
                    cycle.id,
                    mapping.populated.len()
                );
                LoadOutcome::Complete { mapping, rows }
            }
            DestinationStage::Failed(error) => LoadOutcome::DestinationsFailed { mapping, error },
            DestinationStage::Stale => LoadOutcome::Superseded,
        }
    }

    /// Start a cycle: nothing of the previous guidepost stays visible.
    fn begin<'a>(
        &self,
        view: &dyn SidebarView,
        id: GuidePostId,
        nav_state: Option<&'a str>,
    ) -> LoadCycle<'a> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        view.hide_all();
        view.clear_destinations();
        log::debug!("Loading guidepost {id} (cycle {generation})");
        LoadCycle {
            generation,
            id,
            nav_state,
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.current_generation() == generation
    }

    fn primary_failed(
        &self,
        view: &dyn SidebarView,
        cycle: &LoadCycle<'_>,
        error: CoreError,
    ) -> LoadOutcome {
        if !self.is_current(cycle.generation) {
            log::debug!(
                "Dropping attribute failure of guidepost {} (cycle {} superseded): {error}",
                cycle.id,
                cycle.generation
            );
            return LoadOutcome::Superseded;
        }
        log_failure("attributes", &cycle.id, &error);
        view.set_region_visible(Region::Error, true);
        LoadOutcome::PrimaryFailed(error)
    }

    fn show_attributes(
        &self,
        view: &dyn SidebarView,
        cycle: &LoadCycle<'_>,
        attrs: &GuidePostAttributes,
    ) -> FieldMapping {
        let mapping = self.ctx.display.apply(view, attrs);
        view.set_region_visible(Region::Data, true);

        // The deep-link target is consumed by the first successful load,
        // framed or not.
        let Some(target) = self.take_pending_target() else {
            return mapping;
        };
        if !cycle.nav_state.is_some_and(|nav| nav.starts_with(&target)) {
            return mapping;
        }
        match attrs.coordinate() {
            Some((lon, lat)) => {
                log::debug!("Framing map on guidepost {} at {lon},{lat}", cycle.id);
                view.fit_view(BoundingBox::around(lon, lat, BoundingBox::FRAMING_MARGIN));
            }
            None => log::debug!("Guidepost {} has no coordinate to frame", cycle.id),
        }
        mapping
    }

    async fn load_destinations(
        &self,
        view: &dyn SidebarView,
        generation: u64,
        node_id: &GuidePostId,
    ) -> DestinationStage {
        let result = self.ctx.destinations.fetch_destinations(node_id).await;
        if !self.is_current(generation) {
            log::debug!("Dropping destinations of node {node_id} (cycle {generation} superseded)");
            return DestinationStage::Stale;
        }

        match result {
            Ok(list) => {
                let rows = destinations::render(view, list);
                view.set_region_visible(Region::DestinationData, true);
                DestinationStage::Rendered(rows)
            }
            Err(e) => {
                let error = CoreError::from(e);
                log_failure("destinations", node_id, &error);
                view.set_region_visible(Region::DestinationError, true);
                DestinationStage::Failed(error)
            }
        }
    }

    fn take_pending_target(&self) -> Option<String> {
        match self.pending_target.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        }
    }
}

fn log_failure(stage: &str, id: &GuidePostId, error: &CoreError) {
    if error.is_expected() {
        log::warn!("Failed to load {stage} of guidepost {id}: {error}");
    } else {
        log::error!("Failed to load {stage} of guidepost {id}: {error}");
    }
}
