//! Explorer configuration.
//!
//! Every section defaults independently, so a config file only needs to name
//! the values it changes:
//!
//! ```toml
//! [graph]
//! aggregation_threshold = 4
//!
//! [geo]
//! cluster_threshold_degrees = 0.25
//! ```

use std::path::Path;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::components::network_graph::{LayoutConfig, SizingConfig};
use crate::error::{ExplorerError, Result};

/// Default bucket size above which cases are rolled into a group node.
pub const DEFAULT_AGGREGATION_THRESHOLD: usize = 2;

/// Default geo clustering radius, in coordinate degrees.
pub const DEFAULT_CLUSTER_THRESHOLD_DEGREES: f64 = 0.5;

/// Top-level explorer configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
	pub graph: GraphConfig,
	pub layout: LayoutConfig,
	pub geo: GeoConfig,
	pub sizing: SizingConfig,
}

/// Graph construction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
	/// Buckets with more cases than this become a single group node.
	pub aggregation_threshold: usize,
	/// Emit one node per case regardless of bucket size.
	pub individual_mode: bool,
}

impl Default for GraphConfig {
	fn default() -> Self {
		Self {
			aggregation_threshold: DEFAULT_AGGREGATION_THRESHOLD,
			individual_mode: false,
		}
	}
}

/// Geographic clustering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoConfig {
	/// Points closer than this (Euclidean, in degrees) join the same cluster.
	pub cluster_threshold_degrees: f64,
}

impl Default for GeoConfig {
	fn default() -> Self {
		Self {
			cluster_threshold_degrees: DEFAULT_CLUSTER_THRESHOLD_DEGREES,
		}
	}
}

impl ExplorerConfig {
	/// Parse and validate a TOML document.
	pub fn from_toml_str(contents: &str) -> Result<Self> {
		let config: Self = toml::from_str(contents)?;
		config.validate()?;
		Ok(config)
	}

	/// Read, parse and validate a TOML file.
	pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let contents =
			std::fs::read_to_string(path).map_err(|e| ExplorerError::io(path, e))?;
		let config = Self::from_toml_str(&contents)?;
		info!("care-graph: loaded config from {}", path.display());
		Ok(config)
	}

	/// Load a config file, falling back to defaults if it is missing or invalid.
	pub fn load_or_default(path: impl AsRef<Path>) -> Self {
		let path = path.as_ref();
		if !path.exists() {
			debug!("care-graph: no config at {}, using defaults", path.display());
			return Self::default();
		}
		match Self::from_path(path) {
			Ok(config) => config,
			Err(e) => {
				warn!("care-graph: {e}; using defaults");
				Self::default()
			}
		}
	}

	/// Reject values the engine cannot use meaningfully.
	pub fn validate(&self) -> Result<()> {
		let threshold = self.geo.cluster_threshold_degrees;
		if !threshold.is_finite() || threshold < 0.0 {
			return Err(ExplorerError::InvalidConfig(format!(
				"geo.cluster_threshold_degrees must be a non-negative number, got {threshold}"
			)));
		}
		if !self.sizing.node.is_valid() {
			return Err(ExplorerError::InvalidConfig(
				"sizing.node must be finite with min <= max".into(),
			));
		}
		if !self.sizing.edge.is_valid() {
			return Err(ExplorerError::InvalidConfig(
				"sizing.edge must be finite with min <= max".into(),
			));
		}
		if !self.layout.is_valid() {
			return Err(ExplorerError::InvalidConfig(
				"layout values must be finite and non-negative in extent".into(),
			));
		}
		Ok(())
	}
}
