//! Graph construction from organization and case records.
//!
//! Cases join organizations by display name, so an index from
//! `(category, name)` to organization is built once per call. Cases are then
//! bucketed by `(referrer, provider, status)`; buckets above the aggregation
//! threshold collapse into one group node whose two edges carry the bucket
//! size as weight, so edge weights always add up to exact case counts.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use log::{debug, warn};

use super::scale::SizingConfig;
use super::types::{
	Case, CaseLink, Edge, EdgeKind, NetworkGraph, Node, NodeKind, NodeSubject, OrgCategory,
	Organization, Position,
};
use crate::config::GraphConfig;

/// Longest label shown before truncating to a short label.
const SHORT_LABEL_CHARS: usize = 14;

/// A display name claimed by more than one organization of the same category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameCollision {
	pub category: OrgCategory,
	pub name: String,
	/// Organization that owns the name in the join index.
	pub kept: String,
	/// Organization whose name was shadowed; it receives no cases.
	pub shadowed: String,
}

/// Data-quality findings from a build.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildDiagnostics {
	/// Cases left out because a referenced organization name did not resolve.
	pub dropped_cases: Vec<String>,
	pub name_collisions: Vec<NameCollision>,
	/// Node ids claimed by more than one record. Only the first record is kept.
	pub duplicate_ids: Vec<String>,
}

impl BuildDiagnostics {
	pub fn is_clean(&self) -> bool {
		self.dropped_cases.is_empty()
			&& self.name_collisions.is_empty()
			&& self.duplicate_ids.is_empty()
	}
}

/// Build the relationship graph. Positions are left at the origin.
pub fn build(
	organizations: &[Organization],
	cases: &[Case],
	config: &GraphConfig,
	sizing: &SizingConfig,
) -> NetworkGraph {
	let (graph, diagnostics) = build_with_diagnostics(organizations, cases, config, sizing);
	if !diagnostics.is_clean() {
		warn!(
			"care-graph: dropped {} case(s) with unknown organizations, {} name collision(s), {} duplicate id(s)",
			diagnostics.dropped_cases.len(),
			diagnostics.name_collisions.len(),
			diagnostics.duplicate_ids.len()
		);
	}
	graph
}

/// Build the relationship graph and report dangling references and name collisions.
pub fn build_with_diagnostics(
	organizations: &[Organization],
	cases: &[Case],
	config: &GraphConfig,
	sizing: &SizingConfig,
) -> (NetworkGraph, BuildDiagnostics) {
	let mut diagnostics = BuildDiagnostics::default();

	// Node ids must be unique: a repeated id keeps only its first record.
	let mut seen_ids: HashSet<String> = HashSet::new();
	let mut skipped = vec![false; organizations.len()];

	// Name index: first organization to claim a name wins.
	let mut by_name: HashMap<(OrgCategory, &str), usize> = HashMap::new();
	for (idx, org) in organizations.iter().enumerate() {
		let node_id = org_node_id(org);
		if !seen_ids.insert(node_id.clone()) {
			debug!("care-graph: duplicate organization id {node_id}, keeping the first");
			diagnostics.duplicate_ids.push(node_id);
			skipped[idx] = true;
			continue;
		}
		if let Some(&kept) = by_name.get(&(org.category, org.name.as_str())) {
			diagnostics.name_collisions.push(NameCollision {
				category: org.category,
				name: org.name.clone(),
				kept: organizations[kept].id.clone(),
				shadowed: org.id.clone(),
			});
			continue;
		}
		by_name.insert((org.category, org.name.as_str()), idx);
	}

	let mut case_counts = vec![0usize; organizations.len()];
	let mut buckets: IndexMap<(usize, usize, &str), Vec<&Case>> = IndexMap::new();
	for case in cases {
		let node_id = format!("case:{}", case.id);
		if !seen_ids.insert(node_id.clone()) {
			debug!("care-graph: duplicate case id {}, keeping the first", case.id);
			diagnostics.duplicate_ids.push(node_id);
			continue;
		}
		let referrer = by_name.get(&(OrgCategory::Referrer, case.referrer.as_str()));
		let provider = by_name.get(&(OrgCategory::ServiceProvider, case.provider.as_str()));
		let (Some(&r), Some(&p)) = (referrer, provider) else {
			debug!(
				"care-graph: case {} references unknown organization ({} -> {})",
				case.id, case.referrer, case.provider
			);
			diagnostics.dropped_cases.push(case.id.clone());
			continue;
		};
		case_counts[r] += 1;
		case_counts[p] += 1;
		buckets
			.entry((r, p, case.status.as_str()))
			.or_default()
			.push(case);
	}

	let mut nodes = Vec::with_capacity(organizations.len() + cases.len());
	let mut edges = Vec::with_capacity(cases.len() * 2);

	for (idx, org) in organizations.iter().enumerate() {
		if skipped[idx] {
			continue;
		}
		let count = case_counts[idx];
		nodes.push(Node {
			id: org_node_id(org),
			kind: org.category.into(),
			label: org.name.clone(),
			short_label: shorten(&org.name),
			subject: NodeSubject::Organization {
				organization: org.clone(),
			},
			position: Position::default(),
			size: sizing.node.apply(count),
			connection_count: count,
		});
	}

	for ((r, p, status), members) in &buckets {
		let link = CaseLink {
			referrer: org_node_id(&organizations[*r]),
			provider: org_node_id(&organizations[*p]),
			status: status.to_string(),
		};

		if !config.individual_mode && members.len() > config.aggregation_threshold {
			let id = format!(
				"group:{}:{}:{}",
				organizations[*r].id, organizations[*p].id, status
			);
			let weight = members.len();
			push_edges(&mut edges, &id, &link, weight);
			nodes.push(Node {
				label: format!(
					"{} \u{2192} {} ({status})",
					organizations[*r].name, organizations[*p].name
				),
				short_label: format!("{weight} cases"),
				kind: NodeKind::CaseGroup,
				subject: NodeSubject::CaseGroup {
					cases: members.iter().map(|c| (*c).clone()).collect(),
					link,
				},
				position: Position::default(),
				size: sizing.node.apply(weight),
				connection_count: 2,
				id,
			});
		} else {
			for case in members {
				let id = format!("case:{}", case.id);
				push_edges(&mut edges, &id, &link, 1);
				let label = if case.name.is_empty() {
					case.id.clone()
				} else {
					case.name.clone()
				};
				nodes.push(Node {
					short_label: shorten(&label),
					label,
					kind: NodeKind::Case,
					subject: NodeSubject::Case {
						case: (*case).clone(),
						link: link.clone(),
					},
					position: Position::default(),
					size: sizing.node.apply(0),
					connection_count: 2,
					id,
				});
			}
		}
	}

	debug!(
		"care-graph: built {} nodes, {} edges from {} buckets",
		nodes.len(),
		edges.len(),
		buckets.len()
	);

	(NetworkGraph { nodes, edges }, diagnostics)
}

/// Node id for an organization, namespaced by role.
pub fn org_node_id(org: &Organization) -> String {
	match org.category {
		OrgCategory::Referrer => format!("referrer:{}", org.id),
		OrgCategory::ServiceProvider => format!("provider:{}", org.id),
	}
}

fn push_edges(edges: &mut Vec<Edge>, node_id: &str, link: &CaseLink, weight: usize) {
	edges.push(Edge {
		id: format!("referral:{node_id}"),
		source: link.referrer.clone(),
		target: node_id.to_string(),
		kind: EdgeKind::Referral,
		weight,
	});
	edges.push(Edge {
		id: format!("assignment:{node_id}"),
		source: node_id.to_string(),
		target: link.provider.clone(),
		kind: EdgeKind::Assignment,
		weight,
	});
}

fn shorten(label: &str) -> String {
	if label.chars().count() <= SHORT_LABEL_CHARS {
		return label.to_string();
	}
	let mut short: String = label.chars().take(SHORT_LABEL_CHARS - 1).collect();
	short.push('\u{2026}');
	short
}
