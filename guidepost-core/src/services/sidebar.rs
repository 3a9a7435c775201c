//! Host-facing entry point: one `refresh` per navigation signal.

use std::sync::Arc;

use crate::navigation;
use crate::services::{DetailService, LoadOutcome, ServiceContext};
use crate::view::SidebarView;

/// Guidepost sidebar bound to one host container.
pub struct GuidepostSidebar {
    service: DetailService,
}

impl GuidepostSidebar {
    /// `initial_nav_state` is the navigation state at page load; a deep link
    /// to a guidepost frames the map once that guidepost has loaded.
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>, initial_nav_state: &str) -> Self {
        Self {
            service: DetailService::with_navigation(ctx, initial_nav_state),
        }
    }

    pub fn service(&self) -> &DetailService {
        &self.service
    }

    /// Handle the host's refresh signal.
    ///
    /// Resolves the identifier once; returns `None` when the navigation state
    /// selects no guidepost, in which case the view is left untouched.
    pub async fn refresh(&self, view: &dyn SidebarView, nav_state: &str) -> Option<LoadOutcome> {
        let Some(id) = navigation::resolve(nav_state) else {
            log::debug!("No guidepost selected by navigation state `{nav_state}`");
            return None;
        };
        Some(self.service.load_from_navigation(view, id, nav_state).await)
    }
}
