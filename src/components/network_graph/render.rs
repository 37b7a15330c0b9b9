//! Render-ready output for the relationship explorer.
//!
//! Turns a visible graph plus its interaction flags into the exact values a
//! canvas renderer needs: fill colors, opacity, edge stroke width and color.
//! Draw order is left to the renderer; highlighted edges should go on top.

use serde::Serialize;

use super::filter::VisibleGraph;
use super::scale::SizingConfig;
use super::state::Interaction;
use super::theme::Theme;
use super::types::{Edge, Node};

/// A visible node with its display attributes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderNode {
	#[serde(flatten)]
	pub node: Node,
	/// False when another node is active and this one is outside its neighbourhood.
	pub connected: bool,
	pub color: String,
	pub opacity: f64,
}

/// A visible edge with its display attributes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderEdge {
	#[serde(flatten)]
	pub edge: Edge,
	pub highlighted: bool,
	pub color: String,
	pub width: f64,
}

/// Everything needed to draw one frame of the explorer.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RenderGraph {
	pub nodes: Vec<RenderNode>,
	pub edges: Vec<RenderEdge>,
	pub focus: Option<String>,
	pub active: Option<String>,
}

/// Annotate the visible graph. The node and edge sets pass through unchanged.
pub fn render(
	visible: VisibleGraph,
	interaction: &Interaction,
	theme: &Theme,
	sizing: &SizingConfig,
) -> RenderGraph {
	let nodes = visible
		.nodes
		.into_iter()
		.map(|node| {
			let connected = interaction.is_connected(&node.id);
			let base = theme.node_color(node.kind);
			let opacity = if connected { 1.0 } else { theme.dim_alpha };
			RenderNode {
				color: base.with_alpha(opacity).to_css(),
				opacity,
				connected,
				node,
			}
		})
		.collect();

	let edges = visible
		.edges
		.into_iter()
		.map(|edge| {
			let highlighted = interaction.is_highlighted(&edge.id);
			let mut width = sizing.edge.apply(edge.weight);
			if highlighted {
				width *= 1.5;
			}
			RenderEdge {
				color: theme.edge_color(edge.kind, highlighted).to_css(),
				width,
				highlighted,
				edge,
			}
		})
		.collect();

	RenderGraph {
		nodes,
		edges,
		focus: visible.focus,
		active: interaction.active.clone(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::network_graph::state::classify;
	use crate::components::network_graph::types::{
		Case, CaseLink, EdgeKind, NodeKind, NodeSubject, OrgCategory, Organization, Position,
	};

	fn org_node(id: &str, kind: NodeKind) -> Node {
		Node {
			id: id.into(),
			kind,
			label: id.into(),
			short_label: id.into(),
			subject: NodeSubject::Organization {
				organization: Organization {
					id: id.into(),
					name: id.into(),
					category: OrgCategory::Referrer,
					location: String::new(),
				},
			},
			position: Position::default(),
			size: 8.0,
			connection_count: 1,
		}
	}

	fn visible() -> VisibleGraph {
		let mut case = org_node("case:1", NodeKind::Case);
		case.subject = NodeSubject::Case {
			case: Case {
				id: "1".into(),
				name: String::new(),
				referrer: "r".into(),
				provider: "p".into(),
				status: "billable".into(),
			},
			link: CaseLink {
				referrer: "referrer:r".into(),
				provider: "provider:p".into(),
				status: "billable".into(),
			},
		};
		VisibleGraph {
			nodes: vec![
				org_node("referrer:r", NodeKind::Referrer),
				org_node("provider:p", NodeKind::ServiceProvider),
				org_node("referrer:lonely", NodeKind::Referrer),
				case,
			],
			edges: vec![
				Edge {
					id: "referral:case:1".into(),
					source: "referrer:r".into(),
					target: "case:1".into(),
					kind: EdgeKind::Referral,
					weight: 1,
				},
				Edge {
					id: "assignment:case:1".into(),
					source: "case:1".into(),
					target: "provider:p".into(),
					kind: EdgeKind::Assignment,
					weight: 1,
				},
			],
			focus: None,
		}
	}

	#[test]
	fn render_keeps_node_and_edge_sets() {
		let input = visible();
		let interaction = classify(&input, Some("referrer:r"));
		let out = render(
			input.clone(),
			&interaction,
			&Theme::default(),
			&SizingConfig::default(),
		);
		let in_nodes: Vec<_> = input.nodes.iter().map(|n| &n.id).collect();
		let out_nodes: Vec<_> = out.nodes.iter().map(|n| &n.node.id).collect();
		assert_eq!(in_nodes, out_nodes);
		let in_edges: Vec<_> = input.edges.iter().map(|e| &e.id).collect();
		let out_edges: Vec<_> = out.edges.iter().map(|e| &e.edge.id).collect();
		assert_eq!(in_edges, out_edges);
	}

	#[test]
	fn unconnected_nodes_are_dimmed() {
		let input = visible();
		let interaction = classify(&input, Some("referrer:r"));
		let theme = Theme::default();
		let out = render(input, &interaction, &theme, &SizingConfig::default());

		let lonely = out.nodes.iter().find(|n| n.node.id == "referrer:lonely").unwrap();
		assert!(!lonely.connected);
		assert_eq!(lonely.opacity, theme.dim_alpha);
		let active = out.nodes.iter().find(|n| n.node.id == "referrer:r").unwrap();
		assert!(active.connected);
		assert_eq!(active.color, theme.node.referrer.to_css());

		let referral = &out.edges[0];
		assert!(referral.highlighted);
		assert_eq!(referral.color, theme.edge.highlighted.to_css());
		assert!(!out.edges[1].highlighted);
		assert!(referral.width > out.edges[1].width);
		assert_eq!(out.active.as_deref(), Some("referrer:r"));
	}

	#[test]
	fn render_graph_serializes_flat() {
		let input = visible();
		let interaction = classify(&input, None);
		let out = render(input, &interaction, &Theme::default(), &SizingConfig::default());
		let json = serde_json::to_value(&out).unwrap();
		let case = &json["nodes"][3];
		assert_eq!(case["id"], "case:1");
		assert_eq!(case["kind"], "case");
		assert_eq!(case["subject"], "case");
		assert_eq!(case["link"]["provider"], "provider:p");
		assert_eq!(case["connected"], true);
		assert_eq!(json["edges"][0]["kind"], "referral");
	}
}
