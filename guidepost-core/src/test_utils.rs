//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use guidepost_provider::{
    AttributesSource, Destination, DestinationSource, GuidePostAttributes, GuidePostId,
    ProviderError, Result,
};
use tokio::sync::Notify;

use crate::fields::{DisplaySpec, FieldKind, FieldSpec};
use crate::services::ServiceContext;
use crate::view::{BoundingBox, DestinationRow, FieldContent, Region, SidebarView};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

// ===== MockView =====

#[derive(Default)]
struct ViewState {
    visible: BTreeSet<Region>,
    fields: BTreeMap<String, FieldContent>,
    groups: BTreeSet<String>,
    rows: Vec<DestinationRow>,
    framed: Vec<BoundingBox>,
}

/// In-memory sidebar that records what the pipeline did to it.
#[derive(Default)]
pub struct MockView {
    state: Mutex<ViewState>,
}

impl MockView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self, region: Region) -> bool {
        lock(&self.state).visible.contains(&region)
    }

    pub fn visible_regions(&self) -> Vec<Region> {
        lock(&self.state).visible.iter().copied().collect()
    }

    pub fn field(&self, name: &str) -> Option<FieldContent> {
        lock(&self.state).fields.get(name).cloned()
    }

    pub fn group_visible(&self, group: &str) -> bool {
        lock(&self.state).groups.contains(group)
    }

    pub fn rows(&self) -> Vec<DestinationRow> {
        lock(&self.state).rows.clone()
    }

    pub fn framed(&self) -> Vec<BoundingBox> {
        lock(&self.state).framed.clone()
    }
}

impl SidebarView for MockView {
    fn set_region_visible(&self, region: Region, visible: bool) {
        let mut state = lock(&self.state);
        if visible {
            state.visible.insert(region);
        } else {
            state.visible.remove(&region);
        }
    }

    fn clear_field(&self, field: &str) {
        lock(&self.state).fields.remove(field);
    }

    fn fill_field(&self, field: &str, content: FieldContent) {
        lock(&self.state).fields.insert(field.to_string(), content);
    }

    fn set_group_visible(&self, group: &str, visible: bool) {
        let mut state = lock(&self.state);
        if visible {
            state.groups.insert(group.to_string());
        } else {
            state.groups.remove(group);
        }
    }

    fn clear_destinations(&self) {
        lock(&self.state).rows.clear();
    }

    fn append_destination(&self, row: &DestinationRow) {
        lock(&self.state).rows.push(row.clone());
    }

    fn fit_view(&self, bbox: BoundingBox) {
        lock(&self.state).framed.push(bbox);
    }
}

// ===== Gates =====

/// Per-id gates that hold a fetch until released.
#[derive(Default)]
struct Gates(Mutex<HashMap<String, Arc<Notify>>>);

impl Gates {
    fn gate(&self, id: &str) -> Arc<Notify> {
        lock(&self.0)
            .entry(id.to_string())
            .or_insert_with(|| Arc::new(Notify::new()))
            .clone()
    }

    async fn pass(&self, id: &str) {
        let gate = lock(&self.0).get(id).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }
}

fn not_found(service: &str) -> ProviderError {
    ProviderError::HttpStatus {
        service: service.to_string(),
        status: 404,
        body: None,
    }
}

// ===== MockAttributesSource =====

#[derive(Default)]
pub struct MockAttributesSource {
    responses: Mutex<HashMap<String, Result<GuidePostAttributes>>>,
    calls: Mutex<Vec<String>>,
    gates: Gates,
}

impl MockAttributesSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, id: &str, response: Result<GuidePostAttributes>) {
        lock(&self.responses).insert(id.to_string(), response);
    }

    /// Hold fetches of `id` until the returned gate is notified.
    pub fn gate(&self, id: &str) -> Arc<Notify> {
        self.gates.gate(id)
    }

    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl AttributesSource for MockAttributesSource {
    fn id(&self) -> &'static str {
        "attributes"
    }

    async fn fetch_attributes(&self, id: &GuidePostId) -> Result<GuidePostAttributes> {
        lock(&self.calls).push(id.to_string());
        self.gates.pass(id.as_str()).await;
        lock(&self.responses)
            .get(id.as_str())
            .cloned()
            .unwrap_or_else(|| Err(not_found("attributes")))
    }
}

// ===== MockDestinationSource =====

#[derive(Default)]
pub struct MockDestinationSource {
    responses: Mutex<HashMap<String, Result<Vec<Destination>>>>,
    calls: Mutex<Vec<String>>,
    gates: Gates,
}

impl MockDestinationSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, node_id: &str, response: Result<Vec<Destination>>) {
        lock(&self.responses).insert(node_id.to_string(), response);
    }

    pub fn gate(&self, node_id: &str) -> Arc<Notify> {
        self.gates.gate(node_id)
    }

    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl DestinationSource for MockDestinationSource {
    fn id(&self) -> &'static str {
        "destinations"
    }

    async fn fetch_destinations(&self, node_id: &GuidePostId) -> Result<Vec<Destination>> {
        lock(&self.calls).push(node_id.to_string());
        self.gates.pass(node_id.as_str()).await;
        lock(&self.responses)
            .get(node_id.as_str())
            .cloned()
            .unwrap_or_else(|| Err(not_found("destinations")))
    }
}

// ===== 测试工厂方法 =====

pub fn display_spec() -> DisplaySpec {
    DisplaySpec::new(vec![
        FieldSpec::new("name", FieldKind::Text),
        FieldSpec::new("lat", FieldKind::Coordinate),
        FieldSpec::new("lon", FieldKind::Coordinate),
        FieldSpec::new("ele", FieldKind::Elevation).optional("details"),
        FieldSpec::new("website", FieldKind::Url).optional("details"),
    ])
    .unwrap_or_else(|e| unreachable!("static display spec: {e}"))
}

pub fn guidepost(id: u64, lon: f64, lat: f64) -> GuidePostAttributes {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "name": format!("Guidepost {id}"),
        "lon": lon,
        "lat": lat,
    }))
    .unwrap_or_default()
}

pub fn parse_error(service: &str) -> ProviderError {
    ProviderError::ParseError {
        service: service.to_string(),
        detail: "expected value at line 1 column 1".to_string(),
    }
}

pub struct TestContext {
    pub ctx: Arc<ServiceContext>,
    pub attributes: Arc<MockAttributesSource>,
    pub destinations: Arc<MockDestinationSource>,
}

pub fn create_test_context() -> TestContext {
    let attributes = Arc::new(MockAttributesSource::new());
    let destinations = Arc::new(MockDestinationSource::new());
    let ctx = Arc::new(ServiceContext::new(
        attributes.clone(),
        destinations.clone(),
        display_spec(),
    ));
    TestContext {
        ctx,
        attributes,
        destinations,
    }
}
