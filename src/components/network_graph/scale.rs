//! Count-driven sizing for graph visuals.
//!
//! Node sizes follow connection (or member) counts and edge widths follow edge
//! weights. Both use the same linear-then-clamped scale so that a network with
//! a handful of huge hubs does not push every other element into invisibility.
//!
//! # Scaling
//!
//! `value = base + per_unit * count`, clamped to `[min, max]`.

use serde::{Deserialize, Serialize};

/// Linear scale with a clamped output range.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SizeScale {
	/// Value at a count of zero (before clamping).
	pub base: f64,
	/// Increment per counted unit.
	pub per_unit: f64,
	/// Lower bound of the output.
	pub min: f64,
	/// Upper bound of the output.
	pub max: f64,
}

impl SizeScale {
	/// Scale a count into the clamped output range.
	///
	/// Uses `max`/`min` rather than `clamp` so an inverted range never panics;
	/// the upper bound wins in that case.
	pub fn apply(&self, units: usize) -> f64 {
		(self.base + self.per_unit * units as f64)
			.max(self.min)
			.min(self.max)
	}

	pub(crate) fn is_valid(&self) -> bool {
		[self.base, self.per_unit, self.min, self.max]
			.iter()
			.all(|v| v.is_finite())
			&& self.min <= self.max
	}
}

/// Sizing for nodes and edges.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizingConfig {
	/// Node radius from connection count.
	pub node: SizeScale,
	/// Edge stroke width from edge weight.
	pub edge: SizeScale,
}

impl Default for SizingConfig {
	fn default() -> Self {
		Self {
			node: SizeScale {
				base: 8.0,
				per_unit: 2.0,
				min: 8.0,
				max: 32.0,
			},
			edge: SizeScale {
				base: 1.0,
				per_unit: 0.5,
				min: 1.0,
				max: 6.0,
			},
		}
	}
}
