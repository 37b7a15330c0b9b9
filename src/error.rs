//! Error types for loading datasets and configuration.
//!
//! The graph operations themselves are total and never fail; errors only
//! arise at the boundary where files and text are turned into records.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for loading operations.
pub type Result<T> = std::result::Result<T, ExplorerError>;

/// Errors raised while reading datasets or configuration.
#[derive(Error, Debug)]
pub enum ExplorerError {
	/// A file could not be read.
	#[error("failed to read {}: {source}", path.display())]
	Io {
		/// The file that was being read.
		path: PathBuf,
		/// Underlying IO error.
		#[source]
		source: std::io::Error,
	},

	/// Dataset JSON did not match the expected record shapes.
	#[error("failed to parse dataset: {0}")]
	Json(#[from] serde_json::Error),

	/// Configuration TOML could not be parsed.
	#[error("failed to parse config: {0}")]
	Config(#[from] toml::de::Error),

	/// Configuration parsed but holds unusable values.
	#[error("invalid config: {0}")]
	InvalidConfig(String),
}

impl ExplorerError {
	pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
		Self::Io {
			path: path.into(),
			source,
		}
	}
}
