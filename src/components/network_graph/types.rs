//! Record and graph data structures for the relationship explorer.
//!
//! Organizations and cases are the flat input records. Nodes and edges are the
//! typed graph produced by the builder and consumed by layout, filtering and
//! rendering.

use serde::{Deserialize, Serialize};

/// The two organization roles in the bipartite referral network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrgCategory {
	/// Sends cases into the network.
	Referrer,
	/// Receives and services assigned cases.
	ServiceProvider,
}

/// A referring organization or an assigned agency.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Organization {
	/// Unique identifier.
	pub id: String,
	/// Display name. Cases reference organizations by this value.
	pub name: String,
	/// Role of the organization in the network.
	pub category: OrgCategory,
	/// Free-form location string.
	#[serde(default)]
	pub location: String,
}

/// A single case linking one referrer to one service provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Case {
	/// Stable identifier, distinct from the display name.
	pub id: String,
	/// Display name.
	#[serde(default)]
	pub name: String,
	/// Display name of the referring organization.
	pub referrer: String,
	/// Display name of the assigned service provider.
	pub provider: String,
	/// Categorical status label (e.g. "billable", "pending").
	pub status: String,
}

/// Node type in the built graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
	Referrer,
	ServiceProvider,
	Case,
	CaseGroup,
}

impl NodeKind {
	pub fn is_organization(self) -> bool {
		matches!(self, NodeKind::Referrer | NodeKind::ServiceProvider)
	}

	pub fn is_case(self) -> bool {
		matches!(self, NodeKind::Case | NodeKind::CaseGroup)
	}
}

impl From<OrgCategory> for NodeKind {
	fn from(category: OrgCategory) -> Self {
		match category {
			OrgCategory::Referrer => NodeKind::Referrer,
			OrgCategory::ServiceProvider => NodeKind::ServiceProvider,
		}
	}
}

/// Resolved endpoints of a case or case group, as node ids.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct CaseLink {
	/// Node id of the referrer.
	pub referrer: String,
	/// Node id of the service provider.
	pub provider: String,
	/// Shared status label.
	pub status: String,
}

/// The record(s) a node stands for.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "subject", rename_all = "snake_case")]
pub enum NodeSubject {
	Organization {
		organization: Organization,
	},
	Case {
		case: Case,
		link: CaseLink,
	},
	/// Two or more cases sharing referrer, provider and status.
	CaseGroup {
		cases: Vec<Case>,
		link: CaseLink,
	},
}

/// 2-D layout position in canvas units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Position {
	pub x: f64,
	pub y: f64,
}

/// A node in the relationship graph.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Node {
	/// Unique identifier. Edges reference nodes by this value.
	pub id: String,
	pub kind: NodeKind,
	pub label: String,
	/// Compact label for dense rendering.
	pub short_label: String,
	#[serde(flatten)]
	pub subject: NodeSubject,
	pub position: Position,
	/// Render size, clamped to the configured node size range. Organizations
	/// scale with `connection_count`, case groups with their member count, and
	/// single cases stay at the base size.
	pub size: f64,
	/// Number of cases for organizations, incident edges otherwise.
	pub connection_count: usize,
}

impl Node {
	/// Referrer/provider/status for case and case group nodes.
	pub fn case_link(&self) -> Option<&CaseLink> {
		match &self.subject {
			NodeSubject::Case { link, .. } | NodeSubject::CaseGroup { link, .. } => Some(link),
			NodeSubject::Organization { .. } => None,
		}
	}

	/// Number of cases represented by this node (zero for organizations).
	pub fn case_count(&self) -> usize {
		match &self.subject {
			NodeSubject::Organization { .. } => 0,
			NodeSubject::Case { .. } => 1,
			NodeSubject::CaseGroup { cases, .. } => cases.len(),
		}
	}

	/// Case-insensitive substring match against the label and identifying fields.
	///
	/// `needle` must already be lowercased.
	pub fn matches_search(&self, needle: &str) -> bool {
		let hit = |s: &str| s.to_lowercase().contains(needle);
		if hit(&self.label) {
			return true;
		}
		match &self.subject {
			NodeSubject::Organization { organization } => {
				hit(&organization.name) || hit(&organization.location)
			}
			NodeSubject::Case { case, .. } => hit(&case.id) || hit(&case.name),
			NodeSubject::CaseGroup { cases, .. } => {
				cases.iter().any(|c| hit(&c.id) || hit(&c.name))
			}
		}
	}
}

/// Edge type in the built graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
	/// Referrer to case or case group.
	Referral,
	/// Case or case group to service provider.
	Assignment,
}

/// A directed, weighted edge between two nodes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Edge {
	pub id: String,
	/// Source node id.
	pub source: String,
	/// Target node id.
	pub target: String,
	pub kind: EdgeKind,
	/// Number of cases carried by this edge.
	pub weight: usize,
}

impl Edge {
	pub fn touches(&self, node_id: &str) -> bool {
		self.source == node_id || self.target == node_id
	}

	/// The endpoint opposite `node_id`, if this edge touches it.
	pub fn other_end(&self, node_id: &str) -> Option<&str> {
		if self.source == node_id {
			Some(&self.target)
		} else if self.target == node_id {
			Some(&self.source)
		} else {
			None
		}
	}
}

/// Complete graph: nodes and edges.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct NetworkGraph {
	pub nodes: Vec<Node>,
	pub edges: Vec<Edge>,
}

impl NetworkGraph {
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	pub fn contains(&self, id: &str) -> bool {
		self.node(id).is_some()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}
