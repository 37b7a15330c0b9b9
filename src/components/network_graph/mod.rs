//! Relationship graph for the referral network explorer.
//!
//! Turns flat organization and case records into a typed node/edge graph and
//! prepares it for display:
//! - Graph building with aggregation of large case buckets
//! - Deterministic column/grid layout with optional seeded jitter
//! - Visibility filtering by search, status, connection count and type toggles
//! - Focus mode restricting the view to one hub's one-hop neighbourhood
//! - Hover/selection highlighting that never changes the visible set
//!
//! # Example
//!
//! ```
//! use care_graph::components::network_graph::{ExplorerState, FilterCriteria};
//! use care_graph::{Dataset, ExplorerConfig};
//!
//! let dataset = Dataset::from_json_str(r#"{
//!     "organizations": [
//!         { "id": "a", "name": "Alpha Clinic", "category": "referrer" },
//!         { "id": "x", "name": "Xeno Care", "category": "service_provider" }
//!     ],
//!     "cases": [
//!         { "id": "c1", "referrer": "Alpha Clinic", "provider": "Xeno Care", "status": "billable" }
//!     ]
//! }"#).unwrap();
//!
//! let mut explorer = ExplorerState::new(&dataset, ExplorerConfig::default());
//! explorer.set_criteria(FilterCriteria { show_cases: false, ..FilterCriteria::default() });
//! assert_eq!(explorer.view().nodes.len(), 2);
//! ```

pub mod builder;
mod filter;
pub mod layout;
mod render;
pub mod scale;
mod state;
pub mod theme;
mod types;

pub use builder::{BuildDiagnostics, NameCollision, build, build_with_diagnostics};
pub use filter::{FilterCriteria, FilterMode, StatusFilter, VisibleGraph, filter};
pub use layout::{Jitter, LayoutConfig, assign};
pub use render::{RenderEdge, RenderGraph, RenderNode, render};
pub use scale::{SizeScale, SizingConfig};
pub use state::{ExplorerState, Interaction, classify};
pub use theme::{Color, Theme};
pub use types::{
	Case, CaseLink, Edge, EdgeKind, NetworkGraph, Node, NodeKind, NodeSubject, OrgCategory,
	Organization, Position,
};
