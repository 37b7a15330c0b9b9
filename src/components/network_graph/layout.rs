//! Deterministic column/grid layout.
//!
//! Referrers form the left column, service providers the right column, and
//! case/group nodes fill a square-ish grid between them. Optional jitter nudges
//! case nodes off the exact grid; it comes from a seeded RNG so the same input
//! always lands in the same place.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::types::{Node, NodeKind, Position};

/// Cosmetic offset applied to case and group nodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Jitter {
	/// Maximum offset per axis. Zero disables jitter.
	pub amplitude: f64,
	pub seed: u64,
}

impl Default for Jitter {
	fn default() -> Self {
		Self {
			amplitude: 8.0,
			seed: 17,
		}
	}
}

impl Jitter {
	pub fn disabled() -> Self {
		Self {
			amplitude: 0.0,
			seed: 0,
		}
	}
}

/// Canvas geometry for the layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
	/// X coordinate of the referrer column.
	pub left_x: f64,
	/// X coordinate of the service provider column.
	pub right_x: f64,
	/// Y coordinate of the top of the drawing area.
	pub top: f64,
	/// Height of the drawing area.
	pub height: f64,
	/// Left edge of the case grid.
	pub grid_left: f64,
	/// Width of the case grid.
	pub grid_width: f64,
	pub jitter: Jitter,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			left_x: 100.0,
			right_x: 900.0,
			top: 40.0,
			height: 720.0,
			grid_left: 250.0,
			grid_width: 500.0,
			jitter: Jitter::default(),
		}
	}
}

impl LayoutConfig {
	pub(crate) fn is_valid(&self) -> bool {
		let finite = [
			self.left_x,
			self.right_x,
			self.top,
			self.height,
			self.grid_left,
			self.grid_width,
			self.jitter.amplitude,
		]
		.iter()
		.all(|v| v.is_finite());
		finite && self.height >= 0.0 && self.grid_width >= 0.0 && self.jitter.amplitude >= 0.0
	}
}

/// Assign a position to every node, preserving node order.
pub fn assign(mut nodes: Vec<Node>, config: &LayoutConfig) -> Vec<Node> {
	let count_of = |kind: NodeKind| nodes.iter().filter(|n| n.kind == kind).count();
	let referrers = count_of(NodeKind::Referrer);
	let providers = count_of(NodeKind::ServiceProvider);
	let case_nodes = nodes.iter().filter(|n| n.kind.is_case()).count();

	let grid = CaseGrid::new(case_nodes, config);
	let mut rng = StdRng::seed_from_u64(config.jitter.seed);
	let (mut r_idx, mut p_idx, mut c_idx) = (0usize, 0usize, 0usize);

	for node in &mut nodes {
		node.position = match node.kind {
			NodeKind::Referrer => {
				let y = column_y(r_idx, referrers, config);
				r_idx += 1;
				Position { x: config.left_x, y }
			}
			NodeKind::ServiceProvider => {
				let y = column_y(p_idx, providers, config);
				p_idx += 1;
				Position {
					x: config.right_x,
					y,
				}
			}
			NodeKind::Case | NodeKind::CaseGroup => {
				let mut pos = grid.cell(c_idx);
				c_idx += 1;
				let a = config.jitter.amplitude;
				if a > 0.0 {
					pos.x += rng.gen_range(-a..=a);
					pos.y += rng.gen_range(-a..=a);
				}
				pos
			}
		};
	}

	nodes
}

/// Evenly spaced y for the `index`-th of `total` column entries.
fn column_y(index: usize, total: usize, config: &LayoutConfig) -> f64 {
	if total == 0 {
		return config.top;
	}
	let spacing = config.height / (total + 1) as f64;
	config.top + spacing * (index + 1) as f64
}

struct CaseGrid {
	columns: usize,
	cell_width: f64,
	cell_height: f64,
	left: f64,
	top: f64,
}

impl CaseGrid {
	fn new(count: usize, config: &LayoutConfig) -> Self {
		let columns = ((count as f64).sqrt().ceil() as usize).max(1);
		let rows = count.div_ceil(columns).max(1);
		Self {
			columns,
			cell_width: config.grid_width / columns as f64,
			cell_height: config.height / rows as f64,
			left: config.grid_left,
			top: config.top,
		}
	}

	/// Center of the cell for the `index`-th case node.
	fn cell(&self, index: usize) -> Position {
		let (row, col) = (index / self.columns, index % self.columns);
		Position {
			x: self.left + self.cell_width * (col as f64 + 0.5),
			y: self.top + self.cell_height * (row as f64 + 0.5),
		}
	}
}
