//! Point entities, attention categories and the greedy clustering pass.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::components::network_graph::{Color, Theme};

/// How urgently a point entity needs attention. Ordered by severity.
#[derive(
	Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AttentionCategory {
	#[default]
	Good,
	NeedsAttention,
	Critical,
}

/// A latitude/longitude pair in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoCoord {
	pub lat: f64,
	pub lng: f64,
}

impl GeoCoord {
	/// Euclidean distance in coordinate-degree space (not great-circle).
	pub fn distance(self, other: GeoCoord) -> f64 {
		let (dlat, dlng) = (self.lat - other.lat, self.lng - other.lng);
		(dlat * dlat + dlng * dlng).sqrt()
	}
}

/// A point entity to place on the map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
	pub id: String,
	#[serde(default)]
	pub label: String,
	#[serde(default)]
	pub lat: Option<f64>,
	#[serde(default)]
	pub lng: Option<f64>,
	#[serde(default)]
	pub category: AttentionCategory,
}

impl GeoPoint {
	/// Coordinates, if both are present and finite.
	pub fn coord(&self) -> Option<GeoCoord> {
		match (self.lat, self.lng) {
			(Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => {
				Some(GeoCoord { lat, lng })
			}
			_ => None,
		}
	}
}

/// Member counts per attention category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
	pub good: usize,
	pub needs_attention: usize,
	pub critical: usize,
}

impl CategoryCounts {
	fn add(&mut self, category: AttentionCategory) {
		match category {
			AttentionCategory::Good => self.good += 1,
			AttentionCategory::NeedsAttention => self.needs_attention += 1,
			AttentionCategory::Critical => self.critical += 1,
		}
	}

	/// Worst category present: critical > needs attention > good.
	pub fn dominant(&self) -> AttentionCategory {
		if self.critical > 0 {
			AttentionCategory::Critical
		} else if self.needs_attention > 0 {
			AttentionCategory::NeedsAttention
		} else {
			AttentionCategory::Good
		}
	}

	pub fn total(&self) -> usize {
		self.good + self.needs_attention + self.critical
	}
}

/// A group of nearby points drawn as one marker.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Cluster {
	/// Mean of member coordinates; the point itself for singletons.
	pub centroid: GeoCoord,
	pub members: Vec<GeoPoint>,
	pub counts: CategoryCounts,
	pub dominant: AttentionCategory,
}

impl Cluster {
	pub fn len(&self) -> usize {
		self.members.len()
	}

	pub fn is_empty(&self) -> bool {
		self.members.is_empty()
	}

	pub fn marker_color(&self, theme: &Theme) -> Color {
		theme.attention_color(self.dominant)
	}
}

/// Cluster points whose distance to a cluster's seed is below `threshold_degrees`.
///
/// Points without usable coordinates are skipped.
pub fn cluster(points: &[GeoPoint], threshold_degrees: f64) -> Vec<Cluster> {
	let located: Vec<(&GeoPoint, GeoCoord)> = points
		.iter()
		.filter_map(|p| p.coord().map(|c| (p, c)))
		.collect();
	if located.len() < points.len() {
		debug!(
			"care-graph: skipped {} point(s) without usable coordinates",
			points.len() - located.len()
		);
	}

	let mut processed = vec![false; located.len()];
	let mut clusters = Vec::new();

	for i in 0..located.len() {
		if processed[i] {
			continue;
		}
		processed[i] = true;
		let seed = located[i].1;
		let mut members = vec![i];

		for j in (i + 1)..located.len() {
			if !processed[j] && seed.distance(located[j].1) < threshold_degrees {
				processed[j] = true;
				members.push(j);
			}
		}

		let centroid = if members.len() > 1 {
			let n = members.len() as f64;
			let (lat, lng) = members.iter().fold((0.0, 0.0), |(lat, lng), &m| {
				(lat + located[m].1.lat, lng + located[m].1.lng)
			});
			GeoCoord {
				lat: lat / n,
				lng: lng / n,
			}
		} else {
			seed
		};

		let mut counts = CategoryCounts::default();
		for &m in &members {
			counts.add(located[m].0.category);
		}

		clusters.push(Cluster {
			centroid,
			members: members.iter().map(|&m| located[m].0.clone()).collect(),
			dominant: counts.dominant(),
			counts,
		});
	}

	debug!(
		"care-graph: {} point(s) -> {} cluster(s) at {threshold_degrees} degrees",
		located.len(),
		clusters.len()
	);
	clusters
}

#[cfg(test)]
mod tests {
	use super::*;

	fn point(id: &str, lat: f64, lng: f64, category: AttentionCategory) -> GeoPoint {
		GeoPoint {
			id: id.into(),
			label: String::new(),
			lat: Some(lat),
			lng: Some(lng),
			category,
		}
	}

	fn ids(cluster: &Cluster) -> Vec<&str> {
		cluster.members.iter().map(|p| p.id.as_str()).collect()
	}

	#[test]
	fn nearby_points_merge_with_mean_centroid() {
		let points = vec![
			point("a", 40.0, -75.0, AttentionCategory::Good),
			point("b", 40.2, -75.2, AttentionCategory::Critical),
			point("c", 45.0, -70.0, AttentionCategory::NeedsAttention),
		];
		let clusters = cluster(&points, 0.5);
		assert_eq!(clusters.len(), 2);
		assert_eq!(ids(&clusters[0]), vec!["a", "b"]);
		assert!((clusters[0].centroid.lat - 40.1).abs() < 1e-9);
		assert!((clusters[0].centroid.lng + 75.1).abs() < 1e-9);
		assert_eq!(clusters[0].dominant, AttentionCategory::Critical);
		assert_eq!(clusters[1].centroid, GeoCoord { lat: 45.0, lng: -70.0 });
		assert_eq!(clusters[1].dominant, AttentionCategory::NeedsAttention);
	}

	#[test]
	fn distance_is_measured_from_the_seed() {
		// b is within range of a, c only within range of b.
		let points = vec![
			point("a", 0.0, 0.0, AttentionCategory::Good),
			point("b", 0.0, 0.4, AttentionCategory::Good),
			point("c", 0.0, 0.8, AttentionCategory::Good),
		];
		let clusters = cluster(&points, 0.5);
		assert_eq!(clusters.len(), 2);
		assert_eq!(ids(&clusters[0]), vec!["a", "b"]);
		assert_eq!(ids(&clusters[1]), vec!["c"]);
	}

	#[test]
	fn threshold_is_strict() {
		let points = vec![
			point("a", 0.0, 0.0, AttentionCategory::Good),
			point("b", 0.0, 0.5, AttentionCategory::Good),
		];
		assert_eq!(cluster(&points, 0.5).len(), 2);
	}

	#[test]
	fn isolated_pair_clusters_in_either_order() {
		let a = point("a", 10.0, 10.0, AttentionCategory::Good);
		let b = point("b", 10.1, 10.0, AttentionCategory::Good);
		let far = point("far", 30.0, 30.0, AttentionCategory::Good);
		for order in [
			vec![a.clone(), far.clone(), b.clone()],
			vec![b.clone(), a.clone(), far.clone()],
		] {
			let clusters = cluster(&order, 0.5);
			let shared = clusters
				.iter()
				.find(|c| c.members.iter().any(|p| p.id == "a"))
				.unwrap();
			assert!(shared.members.iter().any(|p| p.id == "b"));
		}
	}

	#[test]
	fn missing_or_nan_coordinates_are_skipped() {
		let mut missing = point("missing", 0.0, 0.0, AttentionCategory::Critical);
		missing.lng = None;
		let nan = point("nan", f64::NAN, 0.0, AttentionCategory::Critical);
		let ok = point("ok", 1.0, 1.0, AttentionCategory::Good);
		let clusters = cluster(&[missing, nan, ok], 5.0);
		assert_eq!(clusters.len(), 1);
		assert_eq!(ids(&clusters[0]), vec!["ok"]);
		assert_eq!(clusters[0].centroid, GeoCoord { lat: 1.0, lng: 1.0 });
		assert_eq!(clusters[0].dominant, AttentionCategory::Good);
	}

	#[test]
	fn counts_cover_every_member() {
		let points = vec![
			point("a", 0.0, 0.0, AttentionCategory::Good),
			point("b", 0.0, 0.1, AttentionCategory::NeedsAttention),
			point("c", 0.1, 0.0, AttentionCategory::NeedsAttention),
		];
		let clusters = cluster(&points, 1.0);
		assert_eq!(clusters.len(), 1);
		let counts = clusters[0].counts;
		assert_eq!((counts.good, counts.needs_attention, counts.critical), (1, 2, 0));
		assert_eq!(counts.total(), 3);
		assert_eq!(
			clusters[0].marker_color(&Theme::default()),
			Theme::default().attention.needs_attention
		);
	}

	#[test]
	fn empty_input_yields_no_clusters() {
		assert!(cluster(&[], 0.5).is_empty());
	}
}
