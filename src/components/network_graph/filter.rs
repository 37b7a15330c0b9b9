//! Visibility filtering: general criteria or a focused one-hop neighbourhood.
//!
//! The two modes are exclusive. While a focus target resolves, only its
//! neighbourhood is shown and every other criterion is ignored. Either way the
//! visible edges are recomputed from the surviving nodes, so an edge never
//! points at a hidden node.

use std::collections::HashSet;

use log::debug;
use serde::{Deserialize, Serialize};

use super::types::{Edge, NetworkGraph, Node, NodeKind};

/// Status restriction for case and case group nodes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
	#[default]
	All,
	Only(String),
}

impl StatusFilter {
	/// `"all"` (any case) or an empty string means no restriction.
	pub fn parse(value: &str) -> Self {
		let value = value.trim();
		if value.is_empty() || value.eq_ignore_ascii_case("all") {
			StatusFilter::All
		} else {
			StatusFilter::Only(value.to_string())
		}
	}

	pub fn matches(&self, status: &str) -> bool {
		match self {
			StatusFilter::All => true,
			StatusFilter::Only(wanted) => wanted.eq_ignore_ascii_case(status),
		}
	}
}

/// General filter settings held by the UI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
	pub search: String,
	pub status: StatusFilter,
	/// Organizations with fewer connections are hidden. Cases are exempt.
	pub min_connections: usize,
	pub show_cases: bool,
	/// When false, nodes stay visible but every edge is hidden.
	pub show_edges: bool,
}

impl Default for FilterCriteria {
	fn default() -> Self {
		Self {
			search: String::new(),
			status: StatusFilter::All,
			min_connections: 0,
			show_cases: true,
			show_edges: true,
		}
	}
}

/// How the visible node set is chosen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterMode {
	Unfocused(FilterCriteria),
	/// One-hop neighbourhood of `node_id`; `fallback` applies if it no longer resolves.
	Focused {
		node_id: String,
		fallback: FilterCriteria,
	},
}

/// Filter output: the nodes and edges to draw.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct VisibleGraph {
	pub nodes: Vec<Node>,
	pub edges: Vec<Edge>,
	/// Focus target actually applied, `None` if unfocused or unresolvable.
	pub focus: Option<String>,
}

impl VisibleGraph {
	pub fn contains(&self, id: &str) -> bool {
		self.nodes.iter().any(|n| n.id == id)
	}
}

/// Compute the visible subgraph.
pub fn filter(graph: &NetworkGraph, mode: &FilterMode) -> VisibleGraph {
	match mode {
		FilterMode::Unfocused(criteria) => filter_criteria(graph, criteria),
		FilterMode::Focused { node_id, fallback } => match graph.node(node_id) {
			Some(target) => focus_neighbourhood(graph, target),
			None => {
				debug!("care-graph: focus target {node_id} not in graph, ignoring focus");
				filter_criteria(graph, fallback)
			}
		},
	}
}

fn focus_neighbourhood(graph: &NetworkGraph, target: &Node) -> VisibleGraph {
	let mut keep: HashSet<&str> = HashSet::new();
	keep.insert(&target.id);

	match target.kind {
		NodeKind::Referrer | NodeKind::ServiceProvider => {
			let is_referrer = target.kind == NodeKind::Referrer;
			for node in &graph.nodes {
				let Some(link) = node.case_link() else {
					continue;
				};
				let (own, other) = if is_referrer {
					(&link.referrer, &link.provider)
				} else {
					(&link.provider, &link.referrer)
				};
				if *own == target.id {
					keep.insert(&node.id);
					keep.insert(other);
				}
			}
		}
		NodeKind::Case | NodeKind::CaseGroup => {
			if let Some(link) = target.case_link() {
				keep.insert(&link.referrer);
				keep.insert(&link.provider);
			}
		}
	}

	let mut visible = restrict(graph, |n| keep.contains(n.id.as_str()));
	visible.focus = Some(target.id.clone());
	visible
}

fn filter_criteria(graph: &NetworkGraph, criteria: &FilterCriteria) -> VisibleGraph {
	let needle = criteria.search.trim().to_lowercase();
	let mut visible = restrict(graph, |node| {
		if !needle.is_empty() && !node.matches_search(&needle) {
			return false;
		}
		if node.kind.is_case() {
			criteria.show_cases
				&& node
					.case_link()
					.is_none_or(|link| criteria.status.matches(&link.status))
		} else {
			node.connection_count >= criteria.min_connections
		}
	});
	if !criteria.show_edges {
		visible.edges.clear();
	}
	visible
}

/// Keep nodes passing `keep` in graph order, plus edges between kept nodes.
fn restrict(graph: &NetworkGraph, keep: impl Fn(&Node) -> bool) -> VisibleGraph {
	let nodes: Vec<Node> = graph.nodes.iter().filter(|&n| keep(n)).cloned().collect();
	let ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
	let edges = graph
		.edges
		.iter()
		.filter(|e| ids.contains(e.source.as_str()) && ids.contains(e.target.as_str()))
		.cloned()
		.collect();
	VisibleGraph {
		nodes,
		edges,
		focus: None,
	}
}
