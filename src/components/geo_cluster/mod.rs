//! Greedy spatial clustering of point entities for map display.
//!
//! A single pass over the input: each unprocessed point seeds a cluster and
//! absorbs every later unprocessed point within the threshold of the seed.
//! This is O(n²) and order-sensitive for borderline points; it is meant for
//! hundreds of markers, not tens of thousands.

mod cluster;

pub use cluster::{AttentionCategory, CategoryCounts, Cluster, GeoCoord, GeoPoint, cluster};
