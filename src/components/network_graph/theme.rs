//! Visual theming for the relationship explorer and the map clusters.
//!
//! Provides per-kind node colors, edge colors, attention-category colors for
//! cluster markers and the dimming applied to nodes outside the active
//! neighbourhood.

use super::types::{EdgeKind, NodeKind};
use crate::components::geo_cluster::AttentionCategory;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Fill colors per node kind.
#[derive(Clone, Debug)]
pub struct NodeColors {
	pub referrer: Color,
	pub service_provider: Color,
	pub case: Color,
	pub case_group: Color,
}

/// Edge stroke colors.
#[derive(Clone, Debug)]
pub struct EdgeColors {
	pub referral: Color,
	pub assignment: Color,
	/// Stroke for edges touching the active node.
	pub highlighted: Color,
}

/// Marker colors per attention category.
#[derive(Clone, Debug)]
pub struct AttentionColors {
	pub good: Color,
	pub needs_attention: Color,
	pub critical: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub node: NodeColors,
	pub edge: EdgeColors,
	pub attention: AttentionColors,
	/// Opacity of nodes outside the active neighbourhood.
	pub dim_alpha: f64,
}

impl Theme {
	/// Light clinical theme (default)
	pub fn clinical() -> Self {
		Self {
			name: "clinical",
			node: NodeColors {
				referrer: Color::rgb(25, 118, 210),
				service_provider: Color::rgb(46, 125, 50),
				case: Color::rgb(117, 117, 117),
				case_group: Color::rgb(123, 31, 162),
			},
			edge: EdgeColors {
				referral: Color::rgba(25, 118, 210, 0.45),
				assignment: Color::rgba(46, 125, 50, 0.45),
				highlighted: Color::rgb(230, 81, 0),
			},
			attention: AttentionColors {
				good: Color::rgb(67, 160, 71),
				needs_attention: Color::rgb(251, 140, 0),
				critical: Color::rgb(198, 40, 40),
			},
			dim_alpha: 0.2,
		}
	}

	/// Dark theme with softened fills
	pub fn midnight() -> Self {
		let base = Self::clinical();
		Self {
			name: "midnight",
			node: NodeColors {
				referrer: base.node.referrer.lighten(0.3),
				service_provider: base.node.service_provider.lighten(0.3),
				case: Color::rgb(143, 163, 180),
				case_group: base.node.case_group.lighten(0.3),
			},
			edge: EdgeColors {
				referral: Color::rgba(100, 120, 150, 0.45),
				assignment: Color::rgba(100, 150, 120, 0.45),
				highlighted: Color::rgb(255, 183, 77),
			},
			dim_alpha: 0.15,
			..base
		}
	}

	/// Look up a built-in theme by name.
	pub fn by_name(name: &str) -> Option<Self> {
		match name {
			"clinical" => Some(Self::clinical()),
			"midnight" => Some(Self::midnight()),
			_ => None,
		}
	}

	pub fn node_color(&self, kind: NodeKind) -> Color {
		match kind {
			NodeKind::Referrer => self.node.referrer,
			NodeKind::ServiceProvider => self.node.service_provider,
			NodeKind::Case => self.node.case,
			NodeKind::CaseGroup => self.node.case_group,
		}
	}

	pub fn edge_color(&self, kind: EdgeKind, highlighted: bool) -> Color {
		if highlighted {
			return self.edge.highlighted;
		}
		match kind {
			EdgeKind::Referral => self.edge.referral,
			EdgeKind::Assignment => self.edge.assignment,
		}
	}

	pub fn attention_color(&self, category: AttentionCategory) -> Color {
		match category {
			AttentionCategory::Good => self.attention.good,
			AttentionCategory::NeedsAttention => self.attention.needs_attention,
			AttentionCategory::Critical => self.attention.critical,
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::clinical()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_output_switches_on_alpha() {
		assert_eq!(Color::rgb(25, 118, 210).to_css(), "#1976d2");
		assert_eq!(
			Color::rgb(25, 118, 210).with_alpha(0.2).to_css(),
			"rgba(25, 118, 210, 0.2)"
		);
	}

	#[test]
	fn highlighted_edges_share_one_color() {
		let theme = Theme::default();
		assert_eq!(
			theme.edge_color(EdgeKind::Referral, true),
			theme.edge_color(EdgeKind::Assignment, true)
		);
		assert_ne!(
			theme.edge_color(EdgeKind::Referral, false),
			theme.edge_color(EdgeKind::Assignment, false)
		);
	}

	#[test]
	fn themes_resolve_by_name() {
		assert_eq!(Theme::by_name("midnight").map(|t| t.name), Some("midnight"));
		assert!(Theme::by_name("neon").is_none());
	}
}
