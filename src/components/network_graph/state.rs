//! Explorer session state and interaction classification.
//!
//! Holds the built graph together with filter criteria, focus target and
//! hover/selection. The visible graph and its highlight annotations are
//! recomputed from scratch on every call; nothing here is cached.

use std::collections::HashSet;

use log::{debug, info};

use super::builder;
use super::filter::{FilterCriteria, FilterMode, VisibleGraph, filter};
use super::layout;
use super::render::{RenderGraph, render};
use super::theme::Theme;
use super::types::NetworkGraph;
use crate::Dataset;
use crate::config::ExplorerConfig;

/// Highlight and dimming flags for one render of the visible graph.
///
/// Never changes which nodes or edges are visible; it only says which edges
/// touch the active node and which nodes stay undimmed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Interaction {
	/// Active node the flags were computed for.
	pub active: Option<String>,
	pub highlighted_edges: HashSet<String>,
	pub connected_nodes: HashSet<String>,
}

impl Interaction {
	pub fn is_highlighted(&self, edge_id: &str) -> bool {
		self.highlighted_edges.contains(edge_id)
	}

	pub fn is_connected(&self, node_id: &str) -> bool {
		self.connected_nodes.contains(node_id)
	}
}

/// Classify edges and nodes around the active node.
///
/// With no active node every node is connected and no edge is highlighted.
/// Otherwise an edge is highlighted iff it touches the active node, and a node
/// is connected iff it is the active node or shares a visible edge with it. An
/// active node hidden by the filter therefore leaves every visible node dimmed.
/// A focused hub follows the same rule as any other node.
pub fn classify(visible: &VisibleGraph, active: Option<&str>) -> Interaction {
	let Some(active) = active else {
		return Interaction {
			active: None,
			highlighted_edges: HashSet::new(),
			connected_nodes: visible.nodes.iter().map(|n| n.id.clone()).collect(),
		};
	};

	let mut highlighted_edges = HashSet::new();
	let mut connected_nodes = HashSet::new();
	if visible.contains(active) {
		connected_nodes.insert(active.to_string());
	}
	for edge in &visible.edges {
		if let Some(other) = edge.other_end(active) {
			highlighted_edges.insert(edge.id.clone());
			connected_nodes.insert(other.to_string());
		}
	}

	Interaction {
		active: Some(active.to_string()),
		highlighted_edges,
		connected_nodes,
	}
}

/// Core explorer state combining the built graph with filter and interaction state.
///
/// Created from a dataset, then mutated by UI events. `view` produces the
/// render-ready graph for the current state.
pub struct ExplorerState {
	config: ExplorerConfig,
	theme: Theme,
	graph: NetworkGraph,
	criteria: FilterCriteria,
	focus: Option<String>,
	hovered: Option<String>,
	selected: Option<String>,
}

impl ExplorerState {
	pub fn new(dataset: &Dataset, config: ExplorerConfig) -> Self {
		Self::new_with_theme(dataset, config, Theme::default())
	}

	pub fn new_with_theme(dataset: &Dataset, config: ExplorerConfig, theme: Theme) -> Self {
		let graph = Self::build_graph(dataset, &config);
		Self {
			config,
			theme,
			graph,
			criteria: FilterCriteria::default(),
			focus: None,
			hovered: None,
			selected: None,
		}
	}

	fn build_graph(dataset: &Dataset, config: &ExplorerConfig) -> NetworkGraph {
		let graph = builder::build(
			&dataset.organizations,
			&dataset.cases,
			&config.graph,
			&config.sizing,
		);
		NetworkGraph {
			nodes: layout::assign(graph.nodes, &config.layout),
			edges: graph.edges,
		}
	}

	/// Rebuild from fresh source data, dropping references to vanished nodes.
	pub fn refresh(&mut self, dataset: &Dataset) {
		self.graph = Self::build_graph(dataset, &self.config);
		let graph = &self.graph;
		let retain = |slot: &mut Option<String>, what: &str| {
			if let Some(id) = slot.take_if(|id| !graph.contains(id.as_str())) {
				info!("care-graph: {what} {id} no longer in graph, cleared");
			}
		};
		retain(&mut self.focus, "focus");
		retain(&mut self.hovered, "hover");
		retain(&mut self.selected, "selection");
	}

	pub fn config(&self) -> &ExplorerConfig {
		&self.config
	}

	pub fn graph(&self) -> &NetworkGraph {
		&self.graph
	}

	pub fn criteria(&self) -> &FilterCriteria {
		&self.criteria
	}

	pub fn set_criteria(&mut self, criteria: FilterCriteria) {
		self.criteria = criteria;
	}

	pub fn focus(&self) -> Option<&str> {
		self.focus.as_deref()
	}

	/// Focus on `node_id`, or clear focus if it is already the target.
	///
	/// Returns whether focus is now active. Unknown ids are ignored.
	pub fn toggle_focus(&mut self, node_id: &str) -> bool {
		if self.focus.as_deref() == Some(node_id) {
			info!("care-graph: focus cleared");
			self.focus = None;
			return false;
		}
		if !self.graph.contains(node_id) {
			debug!("care-graph: cannot focus unknown node {node_id}");
			return self.focus.is_some();
		}
		info!("care-graph: focus on {node_id}");
		self.focus = Some(node_id.to_string());
		true
	}

	pub fn clear_focus(&mut self) {
		self.focus = None;
	}

	pub fn hovered(&self) -> Option<&str> {
		self.hovered.as_deref()
	}

	/// Update the hovered node. Ids not in the graph clear the hover.
	pub fn set_hover(&mut self, node_id: Option<&str>) {
		let node_id = node_id.filter(|id| self.graph.contains(id));
		if self.hovered.as_deref() == node_id {
			return;
		}
		self.hovered = node_id.map(str::to_string);
	}

	pub fn selected(&self) -> Option<&str> {
		self.selected.as_deref()
	}

	/// Select a node. Selecting an organization also toggles focus on it.
	pub fn select(&mut self, node_id: &str) {
		let Some(node) = self.graph.node(node_id) else {
			debug!("care-graph: cannot select unknown node {node_id}");
			return;
		};
		let is_hub = node.kind.is_organization();
		self.selected = Some(node_id.to_string());
		if is_hub {
			self.toggle_focus(node_id);
		}
	}

	pub fn clear_selection(&mut self) {
		self.selected = None;
	}

	/// Selected node, else hovered node.
	pub fn active_node(&self) -> Option<&str> {
		self.selected.as_deref().or(self.hovered.as_deref())
	}

	pub fn filter_mode(&self) -> FilterMode {
		match &self.focus {
			Some(node_id) => FilterMode::Focused {
				node_id: node_id.clone(),
				fallback: self.criteria.clone(),
			},
			None => FilterMode::Unfocused(self.criteria.clone()),
		}
	}

	pub fn visible(&self) -> VisibleGraph {
		filter(&self.graph, &self.filter_mode())
	}

	pub fn interaction(&self) -> Interaction {
		classify(&self.visible(), self.active_node())
	}

	/// Render-ready graph for the current state.
	pub fn view(&self) -> RenderGraph {
		let visible = self.visible();
		let interaction = classify(&visible, self.active_node());
		render(visible, &interaction, &self.theme, &self.config.sizing)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::network_graph::types::{Case, OrgCategory, Organization};

	fn dataset() -> Dataset {
		let org = |id: &str, category| Organization {
			id: id.into(),
			name: id.to_uppercase(),
			category,
			location: String::new(),
		};
		let case = |id: &str, r: &str, p: &str| Case {
			id: id.into(),
			name: String::new(),
			referrer: r.into(),
			provider: p.into(),
			status: "billable".into(),
		};
		Dataset {
			organizations: vec![
				org("a", OrgCategory::Referrer),
				org("b", OrgCategory::Referrer),
				org("x", OrgCategory::ServiceProvider),
				org("y", OrgCategory::ServiceProvider),
			],
			cases: vec![case("1", "A", "X"), case("2", "A", "Y"), case("3", "B", "Y")],
			points: Vec::new(),
		}
	}

	fn state() -> ExplorerState {
		ExplorerState::new(&dataset(), ExplorerConfig::default())
	}

	#[test]
	fn no_active_node_dims_nothing() {
		let s = state();
		let visible = s.visible();
		let interaction = classify(&visible, None);
		assert!(interaction.highlighted_edges.is_empty());
		assert_eq!(interaction.connected_nodes.len(), visible.nodes.len());
	}

	#[test]
	fn hover_highlights_incident_edges() {
		let mut s = state();
		s.set_hover(Some("case:2"));
		let interaction = s.interaction();
		assert_eq!(interaction.active.as_deref(), Some("case:2"));
		let mut edges: Vec<_> = interaction.highlighted_edges.iter().cloned().collect();
		edges.sort();
		assert_eq!(edges, vec!["assignment:case:2", "referral:case:2"]);
		let mut nodes: Vec<_> = interaction.connected_nodes.iter().cloned().collect();
		nodes.sort();
		assert_eq!(nodes, vec!["case:2", "provider:y", "referrer:a"]);
	}

	#[test]
	fn selection_beats_hover() {
		let mut s = state();
		s.set_hover(Some("case:1"));
		s.select("case:3");
		assert_eq!(s.active_node(), Some("case:3"));
		assert_eq!(s.focus(), None);
		s.clear_selection();
		assert_eq!(s.active_node(), Some("case:1"));
	}

	#[test]
	fn filtered_edges_never_connect() {
		let mut s = state();
		s.set_criteria(FilterCriteria {
			show_edges: false,
			..FilterCriteria::default()
		});
		s.set_hover(Some("referrer:a"));
		let interaction = s.interaction();
		assert!(interaction.highlighted_edges.is_empty());
		assert_eq!(
			interaction.connected_nodes,
			HashSet::from(["referrer:a".to_string()])
		);
	}

	#[test]
	fn hidden_active_node_dims_everything() {
		let mut s = state();
		s.select("case:1");
		s.set_criteria(FilterCriteria {
			show_cases: false,
			..FilterCriteria::default()
		});
		let interaction = s.interaction();
		assert_eq!(interaction.active.as_deref(), Some("case:1"));
		assert!(interaction.connected_nodes.is_empty());
		assert!(interaction.highlighted_edges.is_empty());

		let view = s.view();
		assert_eq!(view.nodes.len(), 4);
		assert!(view.nodes.iter().all(|n| !n.connected));
	}

	#[test]
	fn focused_hub_is_lit_only_when_active() {
		let mut s = state();
		s.select("referrer:a");
		assert_eq!(s.focus(), Some("referrer:a"));
		let interaction = s.interaction();
		assert!(interaction.is_connected("referrer:a"));

		s.clear_selection();
		s.set_hover(Some("provider:x"));
		let interaction = s.interaction();
		assert!(!interaction.is_connected("referrer:a"));
		assert!(interaction.is_connected("case:1"));
		assert!(!interaction.is_connected("case:2"));
	}

	#[test]
	fn hovering_unknown_node_clears_hover() {
		let mut s = state();
		s.set_hover(Some("case:1"));
		s.set_hover(Some("case:404"));
		assert_eq!(s.hovered(), None);
		assert_eq!(s.interaction().active, None);
	}

	#[test]
	fn selecting_hub_twice_toggles_focus() {
		let mut s = state();
		let before = s.visible();
		s.select("provider:y");
		assert_eq!(s.focus(), Some("provider:y"));
		assert_ne!(s.visible(), before);
		s.select("provider:y");
		assert_eq!(s.focus(), None);
		assert_eq!(s.visible(), before);
	}

	#[test]
	fn toggle_focus_ignores_unknown_nodes() {
		let mut s = state();
		assert!(!s.toggle_focus("referrer:zzz"));
		assert_eq!(s.focus(), None);
		assert!(s.toggle_focus("case:1"));
		assert!(s.toggle_focus("referrer:zzz"));
		assert_eq!(s.focus(), Some("case:1"));
	}

	#[test]
	fn refresh_clears_vanished_focus() {
		let mut s = state();
		s.select("referrer:b");
		s.set_hover(Some("case:3"));
		let mut data = dataset();
		data.organizations.retain(|o| o.id != "b");
		data.cases.retain(|c| c.referrer != "B");
		s.refresh(&data);
		assert_eq!(s.focus(), None);
		assert_eq!(s.selected(), None);
		assert_eq!(s.hovered(), None);
		assert_eq!(s.visible().nodes.len(), 5);
	}

	#[test]
	fn refresh_keeps_surviving_focus() {
		let mut s = state();
		s.toggle_focus("referrer:a");
		s.refresh(&dataset());
		assert_eq!(s.focus(), Some("referrer:a"));
		assert_eq!(s.visible().focus.as_deref(), Some("referrer:a"));
	}
}
