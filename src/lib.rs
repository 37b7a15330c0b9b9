//! care-graph: relationship graph engine for care referral networks.
//!
//! This crate turns referring organizations, service providers and cases into a
//! typed graph for the network explorer, filters it by criteria or focus,
//! classifies hover/selection highlighting, and clusters point entities for
//! map display. Every operation is a pure function of its inputs.

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

pub mod components;
pub mod config;
pub mod error;

pub use components::geo_cluster::{AttentionCategory, Cluster, GeoPoint, cluster};
pub use components::network_graph::{
	Case, ExplorerState, FilterCriteria, NetworkGraph, Organization, RenderGraph, Theme,
};
pub use config::ExplorerConfig;
pub use error::{ExplorerError, Result};

/// Initialize logging for native binaries. Honors `RUST_LOG`, defaulting to `info`.
pub fn init_logging() {
	let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
		.try_init();
	info!("care-graph: logging initialized");
}

/// Source records for one explorer session.
/// Expected format: JSON with { organizations: [...], cases: [...], points: [...] }
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
	pub organizations: Vec<Organization>,
	pub cases: Vec<Case>,
	/// Point entities for the map view.
	pub points: Vec<GeoPoint>,
}

impl Dataset {
	pub fn from_json_str(json: &str) -> Result<Self> {
		let data: Self = serde_json::from_str(json)?;
		info!(
			"care-graph: loaded {} organizations, {} cases, {} points",
			data.organizations.len(),
			data.cases.len(),
			data.points.len()
		);
		Ok(data)
	}

	pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let json = std::fs::read_to_string(path).map_err(|e| ExplorerError::io(path, e))?;
		Self::from_json_str(&json)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_collections_default_to_empty() {
		let data = Dataset::from_json_str("{}").unwrap();
		assert_eq!(data, Dataset::default());
	}

	#[test]
	fn records_deserialize_with_snake_case_enums() {
		let data = Dataset::from_json_str(
			r#"{
				"organizations": [
					{ "id": "p1", "name": "Harbor Home Health", "category": "service_provider", "location": "Boston, MA" }
				],
				"points": [
					{ "id": "pt1", "lat": 42.36, "lng": -71.06, "category": "needs_attention" },
					{ "id": "pt2" }
				]
			}"#,
		)
		.unwrap();
		assert_eq!(
			data.organizations[0].category,
			components::network_graph::OrgCategory::ServiceProvider
		);
		assert_eq!(data.points[0].category, AttentionCategory::NeedsAttention);
		assert_eq!(data.points[1].coord(), None);
		assert_eq!(data.points[1].category, AttentionCategory::Good);
	}

	#[test]
	fn malformed_json_is_a_dataset_error() {
		let err = Dataset::from_json_str(r#"{ "cases": [ { "id": 1 } ] }"#).unwrap_err();
		assert!(matches!(err, ExplorerError::Json(_)));
	}
}
