use crate::renderer::{Renderer, TopologyFrame, TreeFrame};
use crate::{NodeDetails, SelectionController, SketchOverlay, ViewSettings};
use infraview_core::{InfraNode, Infrastructure, ModelError, NodeId, NodeType};
use infraview_events::{ActivationOrigin, Event, EventBus, EventListener, Notification};
use infraview_graph::{Topology, TopologyId, TopologyProjector, Vec2};
use infraview_search::{DebouncedSearch, filter_tree_for_search};
use infraview_tree::{
    DisplayLimits, ExpandState, FlattenedRow, Pagination, RowKind, TreeFlattener, Viewport,
    reveal, sticky_ancestors,
};
use std::time::Instant;

/// Single owner of all view state.
///
/// Every input is handled synchronously. Flattened rows and the active
/// topology are memoized and only recomputed after an input invalidated them.
pub struct ViewController {
    infrastructure: Infrastructure,
    settings: ViewSettings,
    flattener: TreeFlattener,
    projector: TopologyProjector,
    expanded: ExpandState,
    limits: DisplayLimits,
    search: DebouncedSearch,
    viewport: Viewport,
    selection: SelectionController,
    focused_pool: Option<NodeId>,
    active_env: Option<NodeId>,
    rows: Option<Vec<FlattenedRow>>,
    topology: Option<Topology>,
    topology_reset_pending: bool,
    sketch: SketchOverlay,
    notifications: EventBus<Notification>,
}

impl ViewController {
    /// Rejects models with duplicate ids or runaway nesting, since every id
    /// lookup assumes ids are unique within the forest.
    pub fn new(
        infrastructure: Infrastructure,
        settings: ViewSettings,
    ) -> Result<Self, ModelError> {
        infrastructure.validate()?;
        let active_env = infrastructure.first_environment().map(|env| env.id.clone());
        Ok(Self {
            flattener: TreeFlattener::new(settings.pagination()),
            projector: settings.projector(),
            expanded: ExpandState::new(settings.expanded_by_default),
            limits: DisplayLimits::new(),
            search: DebouncedSearch::new(settings.debounce_window()),
            viewport: settings.viewport(),
            selection: SelectionController::new(),
            focused_pool: None,
            sketch: SketchOverlay::for_environment(active_env.clone()),
            active_env,
            rows: None,
            topology: None,
            topology_reset_pending: false,
            notifications: EventBus::new(),
            infrastructure,
            settings,
        })
    }

    pub fn infrastructure(&self) -> &Infrastructure {
        &self.infrastructure
    }

    pub fn settings(&self) -> &ViewSettings {
        &self.settings
    }

    pub fn pagination(&self) -> &Pagination {
        self.flattener.pagination()
    }

    pub fn expand_state(&self) -> &ExpandState {
        &self.expanded
    }

    pub fn display_limits(&self) -> &DisplayLimits {
        &self.limits
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn selected(&self) -> Option<&NodeId> {
        self.selection.selected()
    }

    pub fn focused_pool(&self) -> Option<&NodeId> {
        self.focused_pool.as_ref()
    }

    pub fn active_environment(&self) -> Option<&NodeId> {
        self.active_env.as_ref()
    }

    /// What the search field shows.
    pub fn search_text(&self) -> &str {
        self.search.raw()
    }

    /// The term the views are currently filtered with.
    pub fn applied_search(&self) -> &str {
        self.search.applied()
    }

    pub fn search_deadline(&self) -> Option<Instant> {
        self.search.deadline()
    }

    pub fn sketch(&self) -> &SketchOverlay {
        &self.sketch
    }

    pub fn notifications(&self) -> &EventBus<Notification> {
        &self.notifications
    }

    // ========================================================================
    // Derived views
    // ========================================================================

    fn ensure_rows(&mut self) {
        if self.rows.is_some() {
            return;
        }
        let rows = self.flattener.flatten(
            &self.infrastructure.nodes,
            &self.expanded,
            &self.limits,
            self.search.applied(),
        );
        self.rows = Some(rows);
    }

    fn ensure_topology(&mut self) {
        if self.topology.is_some() {
            return;
        }
        let Some(env_id) = self.active_env.as_ref() else {
            return;
        };
        let Some(env) = self.infrastructure.environment(env_id.as_str()) else {
            tracing::warn!("Active environment {} is not in the model", env_id);
            return;
        };
        let filtered = filter_tree_for_search(std::slice::from_ref(env), self.search.applied());
        let topology = match filtered.first() {
            Some(env) => self.projector.project(env),
            None => self.projector.project(&InfraNode::environment(
                env.id.clone(),
                env.label.clone(),
                Vec::new(),
            )),
        };
        self.topology = Some(topology);
    }

    pub fn rows(&mut self) -> &[FlattenedRow] {
        self.ensure_rows();
        self.rows.as_deref().unwrap_or(&[])
    }

    /// Projection of the active environment, filtered by the applied term.
    pub fn topology(&mut self) -> Option<&Topology> {
        self.ensure_topology();
        self.topology.as_ref()
    }

    fn invalidate_rows(&mut self) {
        if self.rows.take().is_some() {
            self.notifications.publish(Notification::RowsInvalidated);
        }
    }

    // ========================================================================
    // Tree input
    // ========================================================================

    pub fn on_expand_toggle(&mut self, id: &NodeId) {
        let expanded = self.expanded.toggle(id);
        tracing::debug!("{} {}", if expanded { "Expanded" } else { "Collapsed" }, id);
        self.invalidate_rows();
    }

    pub fn expand_all(&mut self) {
        self.expanded.expand_all();
        self.invalidate_rows();
    }

    pub fn collapse_all(&mut self) {
        self.expanded.collapse_all();
        self.invalidate_rows();
    }

    fn is_pool(&self, pool_id: &NodeId) -> bool {
        let found = self
            .infrastructure
            .find_node(pool_id.as_str())
            .is_some_and(|node| node.node_type == NodeType::ServerPool);
        if !found {
            tracing::warn!("Ignoring display limit change for unknown pool {}", pool_id);
        }
        found
    }

    pub fn on_load_more(&mut self, pool_id: &NodeId) {
        if !self.is_pool(pool_id) {
            return;
        }
        let pagination = *self.flattener.pagination();
        let limit = self.limits.load_more(pool_id, &pagination);
        tracing::debug!("Display limit for {} is now {:?}", pool_id, limit);
        self.invalidate_rows();
    }

    pub fn on_load_all(&mut self, pool_id: &NodeId) {
        if !self.is_pool(pool_id) {
            return;
        }
        self.limits.load_all(pool_id);
        self.invalidate_rows();
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Record a keystroke. The views keep their current filter until the
    /// quiescence window passes without further input (see [`Self::tick`]).
    pub fn on_search_input(&mut self, text: impl Into<String>, now: Instant) {
        self.search.input(text, now);
    }

    /// Apply a pending search term whose window has elapsed. Returns true when
    /// the derived views changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let applied = self.search.tick(now).map(str::to_string);
        self.apply_search(applied)
    }

    /// Apply the pending search term immediately.
    pub fn commit_search(&mut self) -> bool {
        let applied = self.search.commit().map(str::to_string);
        self.apply_search(applied)
    }

    fn apply_search(&mut self, term: Option<String>) -> bool {
        let Some(term) = term else {
            return false;
        };
        tracing::debug!("Applying search term {:?}", term);
        self.invalidate_rows();
        self.topology = None;
        self.notifications.publish(Notification::SearchApplied { term });
        true
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Handle a click on a tree row or a topology node. Topology ids are
    /// translated back to a representative model id first. Returns the model
    /// id that ended up selected.
    ///
    /// "Load More"/"Load All" rows grow their pool's display limit and leave
    /// the selection alone.
    pub fn on_node_activate(&mut self, id: &str, origin: ActivationOrigin) -> Option<NodeId> {
        let model_id = match origin {
            ActivationOrigin::Tree => {
                let sentinel = self
                    .rows()
                    .iter()
                    .find(|row| row.is_synthetic() && row.id.as_str() == id)
                    .map(|row| row.kind.clone());
                match sentinel {
                    Some(RowKind::LoadMore { pool_id, .. }) => {
                        self.on_load_more(&pool_id);
                        return None;
                    }
                    Some(RowKind::LoadAll { pool_id, .. }) => {
                        self.on_load_all(&pool_id);
                        return None;
                    }
                    _ => NodeId::from(id),
                }
            }
            ActivationOrigin::Topology => {
                let mapped = self
                    .topology()
                    .and_then(|topology| topology.id_map.to_model(id))
                    .cloned();
                match mapped {
                    Some(model_id) => model_id,
                    None if self.sketch.nodes().iter().any(|node| node.id == id) => {
                        tracing::debug!("Sketched node {} has no model counterpart", id);
                        return None;
                    }
                    None => {
                        self.lookup_miss(id);
                        return None;
                    }
                }
            }
        };
        self.select(model_id.clone());
        Some(model_id)
    }

    fn lookup_miss(&self, id: &str) {
        tracing::warn!("No node for id {}", id);
        self.notifications
            .publish(Notification::LookupMiss { id: id.to_string() });
    }

    /// Select a model id, switching the active environment when it lives in a
    /// different one and revealing its row in the tree.
    pub fn select(&mut self, id: NodeId) {
        tracing::info!("Selected {}", id);
        self.selection.select(id.clone());
        self.notifications.publish(Notification::SelectionChanged {
            id: Some(id.clone()),
        });

        let owner = self
            .selection
            .resolve_owning_environment(&self.infrastructure, id.as_str())
            .cloned();
        let Some(env_id) = owner else {
            self.focused_pool = None;
            self.lookup_miss(id.as_str());
            return;
        };
        if self.active_env.as_ref() != Some(&env_id) {
            self.switch_environment(env_id);
        }

        let Some(path) = self.infrastructure.ancestry(id.as_str()) else {
            return;
        };
        self.focused_pool = path
            .iter()
            .rev()
            .find(|node| node.node_type == NodeType::ServerPool)
            .map(|pool| pool.id.clone());
        let pagination = *self.flattener.pagination();
        if reveal(&path, &mut self.expanded, &mut self.limits, &pagination) {
            self.invalidate_rows();
        }
        self.scroll_selected_into_view();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.focused_pool = None;
        self.notifications
            .publish(Notification::SelectionChanged { id: None });
    }

    fn switch_environment(&mut self, env_id: NodeId) {
        let previous = self.active_env.replace(env_id.clone());
        tracing::info!(
            "Active environment {} -> {}",
            previous.as_ref().map_or("none", NodeId::as_str),
            env_id
        );
        self.topology = None;
        self.topology_reset_pending = true;
        self.sketch = SketchOverlay::for_environment(Some(env_id.clone()));
        self.notifications.publish(Notification::ActiveEnvironmentChanged {
            previous,
            current: Some(env_id.clone()),
        });
        self.notifications.publish(Notification::TopologyReset {
            env_id: Some(env_id),
        });
    }

    fn scroll_selected_into_view(&mut self) {
        if let Some(index) = self.selected_row_index() {
            let total = self.rows().len();
            self.viewport.scroll_row_into_view(index, total);
        }
    }

    /// Index of the selected node's row, when that row is currently flattened.
    pub fn selected_row_index(&mut self) -> Option<usize> {
        self.ensure_rows();
        let selected = self.selection.selected()?;
        self.rows
            .as_deref()?
            .iter()
            .position(|row| !row.is_synthetic() && &row.id == selected)
    }

    pub fn selected_row_id(&mut self) -> Option<NodeId> {
        self.selected_row_index()
            .and(self.selection.selected().cloned())
    }

    pub fn highlighted_topology_id(&mut self) -> Option<TopologyId> {
        self.ensure_topology();
        let topology = self.topology.as_ref()?;
        self.selection.highlighted_topology_id(topology).cloned()
    }

    pub fn details(&self) -> Option<NodeDetails> {
        let selected = self.selection.selected()?;
        NodeDetails::lookup(&self.infrastructure, selected.as_str())
    }

    // ========================================================================
    // Viewport
    // ========================================================================

    /// Returns true when the number of rows to render changed.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        self.viewport.resize(width, height)
    }

    pub fn scroll(&mut self, offset: f32) {
        let total = self.rows().len();
        self.viewport.scroll_to(offset, total);
    }

    // ========================================================================
    // Sketching
    // ========================================================================

    pub fn sketch_connect(&mut self, source: &str, target: &str) -> bool {
        self.ensure_topology();
        match self.topology.as_ref() {
            Some(topology) => self.sketch.connect(topology, source, target).is_some(),
            None => false,
        }
    }

    pub fn sketch_drop(&mut self, source: &str, position: Vec2) -> Option<String> {
        self.ensure_topology();
        let topology = self.topology.as_ref()?;
        Some(self.sketch.drop_at(topology, source, position).id.clone())
    }

    // ========================================================================
    // Output
    // ========================================================================

    pub fn render<R: Renderer>(&mut self, renderer: &mut R) {
        if std::mem::take(&mut self.topology_reset_pending) {
            renderer.reset_topology(self.active_env.as_ref());
        }
        self.ensure_rows();
        self.ensure_topology();

        let rows = self.rows.as_deref().unwrap_or(&[]);
        let window = self.viewport.window(rows.len());
        let selected_row = self
            .selection
            .selected()
            .and_then(|id| rows.iter().position(|row| !row.is_synthetic() && &row.id == id));
        let frame = TreeFrame {
            rows: &rows[window.range()],
            window,
            total_rows: rows.len(),
            width: self.viewport.width(),
            row_height: self.viewport.row_height(),
            sticky: sticky_ancestors(rows, window.first_visible),
            selected_row,
            search_text: self.search.raw(),
        };
        renderer.render_tree(&frame);

        if let Some(topology) = self.topology.as_ref() {
            renderer.render_topology(&TopologyFrame {
                topology,
                highlighted: self.selection.highlighted_topology_id(topology),
                sketch: &self.sketch,
            });
        }
    }
}

impl EventListener<Event> for ViewController {
    fn handle_event(&mut self, event: &Event) {
        match event {
            Event::ExpandToggle { id } => self.on_expand_toggle(id),
            Event::ExpandAll => self.expand_all(),
            Event::CollapseAll => self.collapse_all(),
            Event::LoadMore { pool_id } => self.on_load_more(pool_id),
            Event::LoadAll { pool_id } => self.on_load_all(pool_id),
            Event::SearchInput { text } => self.on_search_input(text.clone(), Instant::now()),
            Event::NodeActivate { id, origin } => {
                self.on_node_activate(id, *origin);
            }
            Event::ClearSelection => self.clear_selection(),
            Event::ViewportResize { width, height } => {
                self.resize(*width, *height);
            }
            Event::Scroll { offset } => self.scroll(*offset),
            Event::SketchConnect { source, target } => {
                self.sketch_connect(source, target);
            }
            Event::SketchDrop { source, x, y } => {
                self.sketch_drop(source, Vec2::new(*x, *y));
            }
        }
    }
}
